use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::instruments::contract::ProductType;

/// Output of the Monte Carlo path engine. Knock-out probability is expressed
/// in percent of simulated trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub npv: f64,
    pub knockout_probability: f64,
}

/// Outcome of a bisection solve. Non-convergence is informational, never an
/// error: an unbracketed root returns the unmodified input value and a
/// best-effort midpoint is returned when the iteration cap is hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub solved_value: f64,
    pub residual_npv: Option<f64>,
    pub converged: bool,
    pub iterations: usize,
}

/// Finite-difference sensitivities. Each figure carries independent Monte
/// Carlo noise since bumped repricings draw fresh randomness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Estimated P&L at one spot shock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPnl {
    pub spot_shock_pct: f64,
    pub estimated_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub npv: f64,
    pub knockout_probability: f64,
    pub greeks: Greeks,
    pub scenarios: Vec<ScenarioPnl>,
}

/// One row of the backtest ledger, immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixingRecord {
    pub index: usize,
    pub date: NaiveDate,
    pub spot: f64,
    pub strike: f64,
    pub barrier: f64,
    pub pnl: f64,
    pub cumulative_pnl: f64,
    pub units: f64,
    pub action: String,
    pub geared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BacktestStatus {
    #[serde(rename = "Knocked Out")]
    KnockedOut,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub final_pnl: f64,
    pub total_units: f64,
    pub status: BacktestStatus,
    pub ko_date: Option<NaiveDate>,
    pub product_type: ProductType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub summary: BacktestSummary,
    pub ledger: Vec<FixingRecord>,
}
