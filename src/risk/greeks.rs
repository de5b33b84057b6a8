use crate::core::market::MarketState;
use crate::core::results::{Greeks, RiskReport, ScenarioPnl};
use crate::instruments::contract::ContractTerms;
use crate::models::montecarlo::MonteCarloPricer;
use crate::utils::errors::Result;

/// Spot shocks, in percent, repriced for the scenario ladder.
pub const SPOT_SHOCKS_PCT: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

const SPOT_BUMP_FRACTION: f64 = 0.01;
const VOL_BUMP: f64 = 0.01;
const RATE_BUMP: f64 = 0.01;

fn reprice(pricer: &MonteCarloPricer, market: MarketState, contract: &ContractTerms) -> Result<f64> {
    Ok(pricer.price(&market, contract)?.npv)
}

/// Finite-difference risk report: central delta and gamma on a 1% spot bump,
/// forward vega per vol point, one-day theta and forward rho per rate point,
/// plus the spot-shock scenario ladder.
///
/// Every bumped repricing runs at the same trial count as the baseline and
/// draws its own randomness, so each Greek carries independent Monte Carlo
/// noise. Common random numbers across bumps would tighten them, but that is
/// a contract change and is deliberately not assumed here.
pub fn compute_risk(market: &MarketState, contract: &ContractTerms) -> Result<RiskReport> {
    compute_risk_with(&MonteCarloPricer::new(), market, contract)
}

/// Same as [`compute_risk`] but with a caller-configured pricer (trial count
/// or seed).
pub fn compute_risk_with(
    pricer: &MonteCarloPricer,
    market: &MarketState,
    contract: &ContractTerms,
) -> Result<RiskReport> {
    let base = pricer.price(market, contract)?;
    let npv = base.npv;

    let ds = market.spot_price * SPOT_BUMP_FRACTION;
    let up = reprice(pricer, market.with_spot(market.spot_price + ds), contract)?;
    let down = reprice(pricer, market.with_spot(market.spot_price - ds), contract)?;
    let delta = (up - down) / (2.0 * ds);
    let gamma = (up - 2.0 * npv + down) / (ds * ds);

    let vol_up = reprice(
        pricer,
        market.with_volatility(market.volatility + VOL_BUMP),
        contract,
    )?;
    let vega = (vol_up - npv) / 100.0;

    let decayed = reprice(
        pricer,
        market.with_days_to_expiry((market.days_to_expiry - 1.0).max(0.0)),
        contract,
    )?;
    let theta = decayed - npv;

    let rate_up = reprice(
        pricer,
        market.with_rate(market.risk_free_rate + RATE_BUMP),
        contract,
    )?;
    let rho = (rate_up - npv) / 100.0;

    let mut scenarios = Vec::with_capacity(SPOT_SHOCKS_PCT.len());
    for pct in SPOT_SHOCKS_PCT {
        let shocked_spot = market.spot_price * (1.0 + pct / 100.0);
        let estimated_pnl = reprice(pricer, market.with_spot(shocked_spot), contract)?;
        scenarios.push(ScenarioPnl {
            spot_shock_pct: pct,
            estimated_pnl,
        });
    }

    Ok(RiskReport {
        npv,
        knockout_probability: base.knockout_probability,
        greeks: Greeks {
            delta,
            gamma,
            vega,
            theta,
            rho,
        },
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::contract::ProductType;
    use crate::time::schedule::Frequency;

    fn contract() -> ContractTerms {
        ContractTerms {
            strike_price: 110.0,
            barrier_price: 150.0,
            notional: 1_000_000.0,
            leverage: 2.0,
            gearing_limit: 10,
            product_type: ProductType::Accumulator,
            frequency: Frequency::Daily,
        }
    }

    #[test]
    fn test_greeks_are_finite() -> Result<()> {
        let market = MarketState::new(100.0, 0.2, 0.03, 90.0);
        let pricer = MonteCarloPricer::new().with_num_simulations(200).with_seed(9);
        let report = compute_risk_with(&pricer, &market, &contract())?;
        let g = report.greeks;
        for value in [g.delta, g.gamma, g.vega, g.theta, g.rho] {
            assert!(value.is_finite());
        }
        Ok(())
    }

    #[test]
    fn test_accumulator_delta_is_long_below_strike() -> Result<()> {
        // Zero volatility makes every repricing deterministic: the client
        // buys at 110 on a flat path at 100, and a higher spot strictly
        // improves each fixing, so delta must be positive.
        let market = MarketState::new(100.0, 0.0, 0.0, 180.0);
        let pricer = MonteCarloPricer::new().with_num_simulations(10);
        let report = compute_risk_with(&pricer, &market, &contract())?;
        assert!(report.npv < 0.0);
        assert!(report.greeks.delta > 0.0);
        Ok(())
    }

    #[test]
    fn test_scenario_ladder_shape() -> Result<()> {
        let market = MarketState::new(100.0, 0.0, 0.0, 90.0);
        let pricer = MonteCarloPricer::new().with_num_simulations(10);
        let report = compute_risk_with(&pricer, &market, &contract())?;
        assert_eq!(report.scenarios.len(), 5);
        let shocks: Vec<f64> = report.scenarios.iter().map(|s| s.spot_shock_pct).collect();
        assert_eq!(shocks, SPOT_SHOCKS_PCT.to_vec());
        // The flat scenario is just the baseline valuation.
        assert!((report.scenarios[2].estimated_pnl - report.npv).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_expiring_today_has_zero_theta() -> Result<()> {
        let market = MarketState::new(100.0, 0.0, 0.0, 0.0);
        let pricer = MonteCarloPricer::new().with_num_simulations(10);
        let report = compute_risk_with(&pricer, &market, &contract())?;
        assert_eq!(report.greeks.theta, 0.0);
        assert_eq!(report.npv, 0.0);
        Ok(())
    }
}
