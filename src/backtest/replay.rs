use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;

use crate::cashflows::payoff::{effective_leverage, evaluate_fixing};
use crate::core::marketdata::{ClosePrice, MarketDataProvider};
use crate::core::requests::SimulationRequest;
use crate::core::results::{BacktestResult, BacktestStatus, BacktestSummary, FixingRecord};
use crate::instruments::contract::{ContractTerms, ProductType};
use crate::time::schedule::generate_schedule;
use crate::utils::errors::{AccumError, Result};

#[derive(Clone, Copy)]
enum DayState {
    Active,
    Terminated,
}

fn format_leverage(leverage: f64) -> String {
    if leverage.fract() == 0.0 {
        format!("{}", leverage as i64)
    } else {
        format!("{}", leverage)
    }
}

fn fixing_action(product_type: ProductType, applied_leverage: f64) -> String {
    match product_type {
        ProductType::Accumulator => format!("Accumulate ({}x)", format_leverage(applied_leverage)),
        ProductType::Decumulator => format!("Decumulate ({}x)", format_leverage(applied_leverage)),
    }
}

/// Replays the contract's knock-out and gearing state machine over a
/// realized close series, producing one ledger row per trading day.
///
/// History-only and free of randomness, so replaying the same series twice
/// yields an identical ledger. Days before the first breach either settle a
/// fixing (when the date is in `fixing_dates`) or record a zero-P&L hold;
/// the breach day records the knock-out itself at zero P&L, and every later
/// day is a zero-P&L "Terminated" row.
pub fn replay(
    series: &[ClosePrice],
    contract: &ContractTerms,
    fixing_dates: &HashSet<NaiveDate>,
) -> Result<BacktestResult> {
    contract.validate()?;

    let mut ledger = Vec::with_capacity(series.len());
    let mut state = DayState::Active;
    let mut total_pnl = 0.0;
    let mut total_units = 0.0;
    let mut fixing_counter = 0usize;
    let mut ko_date: Option<NaiveDate> = None;

    for (index, observation) in series.iter().enumerate() {
        let spot = observation.close;
        let mut record = FixingRecord {
            index,
            date: observation.date,
            spot,
            strike: contract.strike_price,
            barrier: contract.barrier_price,
            pnl: 0.0,
            cumulative_pnl: total_pnl,
            units: 0.0,
            action: "Hold".to_string(),
            geared: false,
        };

        match state {
            DayState::Terminated => {
                record.action = "Terminated".to_string();
            }
            DayState::Active => {
                if contract
                    .product_type
                    .is_knock_out(spot, contract.barrier_price)
                {
                    state = DayState::Terminated;
                    ko_date = Some(observation.date);
                    record.action = "Knock Out".to_string();
                } else if fixing_dates.contains(&observation.date) {
                    fixing_counter += 1;
                    let is_geared = fixing_counter <= contract.gearing_limit;
                    let applied = effective_leverage(
                        spot,
                        contract.strike_price,
                        contract.leverage,
                        is_geared,
                        contract.product_type,
                    );
                    let fixing = evaluate_fixing(
                        spot,
                        contract.strike_price,
                        contract.notional,
                        contract.leverage,
                        is_geared,
                        contract.product_type,
                    )?;
                    total_pnl += fixing.pnl;
                    total_units += fixing.units;
                    record.pnl = fixing.pnl;
                    record.cumulative_pnl = total_pnl;
                    record.units = fixing.units;
                    record.geared = is_geared;
                    record.action = fixing_action(contract.product_type, applied);
                }
            }
        }
        ledger.push(record);
    }

    let status = if ko_date.is_some() {
        BacktestStatus::KnockedOut
    } else {
        BacktestStatus::Expired
    };
    Ok(BacktestResult {
        summary: BacktestSummary {
            final_pnl: total_pnl,
            total_units,
            status,
            ko_date,
            product_type: contract.product_type,
        },
        ledger,
    })
}

/// End-to-end backtest: fetch the realized series for the requested ticker,
/// build the fixing schedule, and replay the contract over it.
pub fn run_simulation<P: MarketDataProvider>(
    provider: &P,
    request: &SimulationRequest,
) -> Result<BacktestResult> {
    info!(ticker = %request.ticker, frequency = ?request.frequency, "running backtest");

    let bars = provider.fetch_history(&request.ticker, request.start_date, request.end_date)?;
    if bars.is_empty() {
        return Err(AccumError::NoDataFound(format!(
            "No data found for {}",
            request.ticker
        )));
    }

    let schedule = generate_schedule(request.start_date, request.end_date, request.frequency)?;
    let fixing_dates: HashSet<NaiveDate> = schedule.into_iter().collect();
    let series: Vec<ClosePrice> = bars.iter().map(ClosePrice::from).collect();
    replay(&series, &request.contract_terms(), &fixing_dates)
}
