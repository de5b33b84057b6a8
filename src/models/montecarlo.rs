use rand::{rngs::StdRng, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::cashflows::payoff::evaluate_fixing;
use crate::core::market::{MarketState, TRADING_DAYS_PER_YEAR};
use crate::core::results::PricingResult;
use crate::instruments::contract::ContractTerms;
use crate::models::gbm::GbmProcess;
use crate::utils::errors::Result;

/// Trial count for a final valuation.
pub const DEFAULT_NUM_SIMULATIONS: usize = 5000;

/// Reduced trial count for solver and other iterated repricings, which call
/// the engine up to ~17 times per request.
pub const SOLVER_NUM_SIMULATIONS: usize = 2000;

#[derive(Debug, Clone, Copy)]
struct TrialOutcome {
    pnl: f64,
    knocked_out: bool,
}

/// Monte Carlo pricer for accumulator/decumulator structures.
///
/// Each trial owns one simulated GBM path, scans it for the first barrier
/// breach (discrete daily monitoring, which understates the true continuous
/// knock-out probability - a known approximation kept for compatibility),
/// then settles the surviving fixings at the frequency's step interval and
/// discounts each cash flow back at the risk-free rate.
///
/// Trials run in parallel and are reduced in trial order, so a seeded pricer
/// reproduces its result exactly; an unseeded pricer draws from entropy.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloPricer {
    num_simulations: usize,
    seed: Option<u64>,
}

impl Default for MonteCarloPricer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonteCarloPricer {
    pub fn new() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            seed: None,
        }
    }

    pub fn with_num_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Prices the structure, returning its NPV and the knock-out probability
    /// in percent. Zero time to expiry is a valid degenerate case and prices
    /// to exactly `(0, 0)`; negative tenor, negative volatility and
    /// non-positive spot are errors.
    pub fn price(&self, market: &MarketState, contract: &ContractTerms) -> Result<PricingResult> {
        market.validate()?;
        contract.validate()?;

        let t = market.time_to_expiry();
        if t <= 0.0 {
            return Ok(PricingResult {
                npv: 0.0,
                knockout_probability: 0.0,
            });
        }

        let num_steps = ((t * TRADING_DAYS_PER_YEAR).round() as usize).max(1);
        let dt = t / num_steps as f64;
        let step_interval = contract.frequency.step_interval();
        let process = GbmProcess::new(market.spot_price, market.risk_free_rate, market.volatility);
        let rate = market.risk_free_rate;
        let seed = self.seed;

        let outcomes = (0..self.num_simulations)
            .into_par_iter()
            .map(|trial| {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s.wrapping_add(trial as u64)),
                    None => StdRng::from_entropy(),
                };
                let path = process.path(num_steps, dt, &mut rng);
                run_trial(&path, contract, step_interval, dt, rate)
            })
            .collect::<Result<Vec<TrialOutcome>>>()?;

        let mut pnl_sum = 0.0;
        let mut ko_count = 0usize;
        for outcome in &outcomes {
            pnl_sum += outcome.pnl;
            if outcome.knocked_out {
                ko_count += 1;
            }
        }

        let n = outcomes.len() as f64;
        Ok(PricingResult {
            npv: pnl_sum / n,
            knockout_probability: ko_count as f64 / n * 100.0,
        })
    }
}

/// Settles one simulated path: truncate at the first barrier breach
/// (inclusive), then walk the survivors at the fixing interval. The gearing
/// counter advances only on fixings that actually settle.
fn run_trial(
    path: &[f64],
    contract: &ContractTerms,
    step_interval: usize,
    dt: f64,
    rate: f64,
) -> Result<TrialOutcome> {
    let breach = path
        .iter()
        .position(|&spot| contract.product_type.is_knock_out(spot, contract.barrier_price));
    let (alive, knocked_out) = match breach {
        Some(idx) => (&path[..=idx], true),
        None => (path, false),
    };

    let mut pnl = 0.0;
    let mut fixing_counter = 0usize;
    let mut step = step_interval;
    while step < alive.len() {
        fixing_counter += 1;
        let is_geared = fixing_counter <= contract.gearing_limit;
        let fixing = evaluate_fixing(
            alive[step],
            contract.strike_price,
            contract.notional,
            contract.leverage,
            is_geared,
            contract.product_type,
        )?;
        pnl += fixing.pnl * (-rate * step as f64 * dt).exp();
        step += step_interval;
    }

    Ok(TrialOutcome { pnl, knocked_out })
}
