use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::requests::SimulationRequest;
use crate::instruments::contract::ProductType;
use crate::time::schedule::generate_schedule;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegSide {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

/// One vanilla-with-barrier leg of a fixing's decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub side: LegSide,
    pub kind: OptionKind,
    pub strike: f64,
    pub barrier: f64,
    pub notional: f64,
}

/// Option decomposition of a single fixing: each accumulator fixing is a
/// long call plus a short put (reversed for a decumulator), with the gearing
/// multiplier sitting on the short leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixingLeg {
    pub fixing_id: usize,
    pub date: NaiveDate,
    pub geared: bool,
    pub long_leg: OptionLeg,
    pub short_leg: OptionLeg,
}

/// Deterministic per-fixing breakdown of the structure for display. Derived
/// from the contract terms and schedule alone, no simulation involved.
pub fn build_structure(request: &SimulationRequest) -> Result<Vec<FixingLeg>> {
    let schedule = generate_schedule(request.start_date, request.end_date, request.frequency)?;
    let (long_kind, short_kind) = match request.product_type {
        ProductType::Accumulator => (OptionKind::Call, OptionKind::Put),
        ProductType::Decumulator => (OptionKind::Put, OptionKind::Call),
    };

    let legs = schedule
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let fixing_id = i + 1;
            let geared = fixing_id <= request.gearing_limit;
            let risk_multiplier = if geared { request.leverage } else { 1.0 };
            FixingLeg {
                fixing_id,
                date,
                geared,
                long_leg: OptionLeg {
                    side: LegSide::Long,
                    kind: long_kind,
                    strike: request.strike_price,
                    barrier: request.ko_price,
                    notional: request.notional,
                },
                short_leg: OptionLeg {
                    side: LegSide::Short,
                    kind: short_kind,
                    strike: request.strike_price,
                    barrier: request.ko_price,
                    notional: request.notional * risk_multiplier,
                },
            }
        })
        .collect();
    Ok(legs)
}
