use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::market::MarketState;
use crate::core::results::SolverResult;
use crate::instruments::contract::ContractTerms;
use crate::models::montecarlo::{MonteCarloPricer, SOLVER_NUM_SIMULATIONS};
use crate::utils::errors::Result;

/// Free parameter the solver adjusts to zero the NPV. Wire names match the
/// request fields they stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveTarget {
    #[serde(rename = "strike_price")]
    Strike,
    #[serde(rename = "ko_price")]
    Barrier,
    #[serde(rename = "leverage")]
    Leverage,
}

/// Iteration cap. Bounded on purpose: 15 halvings of the bracket are enough
/// for display precision and keep worst-case latency at 17 pricer calls.
pub const MAX_ITERATIONS: usize = 15;

/// Convergence threshold as a fraction of notional.
pub const NPV_TOLERANCE_FRACTION: f64 = 0.001;

fn apply_target(contract: &ContractTerms, target: SolveTarget, value: f64) -> ContractTerms {
    match target {
        SolveTarget::Strike => contract.with_strike(value),
        SolveTarget::Barrier => contract.with_barrier(value),
        SolveTarget::Leverage => contract.with_leverage(value),
    }
}

fn current_value(contract: &ContractTerms, target: SolveTarget) -> f64 {
    match target {
        SolveTarget::Strike => contract.strike_price,
        SolveTarget::Barrier => contract.barrier_price,
        SolveTarget::Leverage => contract.leverage,
    }
}

fn bounds(market: &MarketState, target: SolveTarget) -> (f64, f64) {
    match target {
        SolveTarget::Leverage => (0.0, 100.0),
        SolveTarget::Strike | SolveTarget::Barrier => {
            (market.spot_price * 0.5, market.spot_price * 1.5)
        }
    }
}

/// Bisection search for the target parameter value that sets the structure's
/// NPV to zero.
///
/// Fixed-iteration, fixed-tolerance by design: each NPV evaluation is a
/// 2000-trial Monte Carlo run, so the search trades root-finding robustness
/// for bounded latency. Two fail-soft outcomes are part of the contract and
/// are reported rather than raised:
///
/// * bounds that do not bracket a sign change return the unmodified input
///   value (`converged: false`, no residual) - an approximation, not a
///   guarantee that the input was right;
/// * hitting the iteration cap returns the last midpoint with its residual
///   NPV (`converged: false`).
pub fn solve(
    market: &MarketState,
    contract: &ContractTerms,
    target: SolveTarget,
) -> Result<SolverResult> {
    info!(solve_target = ?target, "solving for zero-NPV parameter");

    let pricer = MonteCarloPricer::new().with_num_simulations(SOLVER_NUM_SIMULATIONS);
    let npv_at = |value: f64| -> Result<f64> {
        Ok(pricer
            .price(market, &apply_target(contract, target, value))?
            .npv)
    };

    let (mut low, mut high) = bounds(market, target);
    let npv_low = npv_at(low)?;
    let npv_high = npv_at(high)?;

    if npv_low.signum() == npv_high.signum() {
        warn!(
            npv_low,
            npv_high, "root not bracketed, returning input value unchanged"
        );
        return Ok(SolverResult {
            solved_value: current_value(contract, target),
            residual_npv: None,
            converged: false,
            iterations: 0,
        });
    }

    let tolerance = contract.notional.abs() * NPV_TOLERANCE_FRACTION;
    let sign_low = npv_low.signum();
    let mut mid = (low + high) / 2.0;
    let mut residual = npv_at(mid)?;

    for iteration in 1..=MAX_ITERATIONS {
        if residual.abs() < tolerance {
            return Ok(SolverResult {
                solved_value: mid,
                residual_npv: Some(residual),
                converged: true,
                iterations: iteration,
            });
        }
        if iteration == MAX_ITERATIONS {
            break;
        }

        // The low side keeps its initial NPV sign through every halving.
        if residual.signum() == sign_low {
            low = mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2.0;
        residual = npv_at(mid)?;
    }

    Ok(SolverResult {
        solved_value: mid,
        residual_npv: Some(residual),
        converged: false,
        iterations: MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::contract::ProductType;
    use crate::time::schedule::Frequency;

    fn zero_vol_market() -> MarketState {
        MarketState::new(100.0, 0.0, 0.0, 365.0)
    }

    fn contract() -> ContractTerms {
        ContractTerms {
            strike_price: 100.0,
            barrier_price: 150.0,
            notional: 1_000_000.0,
            leverage: 2.0,
            gearing_limit: 10,
            product_type: ProductType::Accumulator,
            frequency: Frequency::Daily,
        }
    }

    #[test]
    fn test_strike_solve_converges_to_spot_at_zero_vol() -> Result<()> {
        // With zero volatility and zero rate the path sits at spot forever,
        // so the zero-NPV strike is the spot itself. The first midpoint of
        // [50, 150] already lands there.
        let result = solve(&zero_vol_market(), &contract(), SolveTarget::Strike)?;
        assert!(result.converged);
        assert!(result.iterations <= MAX_ITERATIONS);
        assert!((result.solved_value - 100.0).abs() < 1.0);
        assert!(result.residual_npv.unwrap().abs() < 1_000_000.0 * NPV_TOLERANCE_FRACTION);
        Ok(())
    }

    #[test]
    fn test_unbracketed_root_returns_input_unchanged() -> Result<()> {
        // Strike fixed below spot on a flat path: every fixing pays the
        // client, so NPV is positive at any leverage and no sign change
        // exists over [0, 100].
        let terms = contract().with_strike(90.0);
        let result = solve(&zero_vol_market(), &terms, SolveTarget::Leverage)?;
        assert!(!result.converged);
        assert_eq!(result.solved_value, terms.leverage);
        assert_eq!(result.residual_npv, None);
        assert_eq!(result.iterations, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_market_propagates() {
        let market = MarketState::new(100.0, -0.5, 0.0, 365.0);
        assert!(solve(&market, &contract(), SolveTarget::Strike).is_err());
    }
}
