use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::market::MarketState;
use crate::instruments::contract::{ContractTerms, ProductType};
use crate::solvers::bisection::SolveTarget;
use crate::time::schedule::Frequency;

/// Request for a historical backtest or structure breakdown over a realized
/// price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub product_type: ProductType,
    pub frequency: Frequency,
    pub strike_price: f64,
    pub ko_price: f64,
    pub notional: f64,
    pub leverage: f64,
    pub gearing_limit: usize,
}

impl SimulationRequest {
    pub fn contract_terms(&self) -> ContractTerms {
        ContractTerms {
            strike_price: self.strike_price,
            barrier_price: self.ko_price,
            notional: self.notional,
            leverage: self.leverage,
            gearing_limit: self.gearing_limit,
            product_type: self.product_type,
            frequency: self.frequency,
        }
    }
}

/// Request for a Monte Carlo valuation with Greeks and scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub spot_price: f64,
    pub strike_price: f64,
    pub ko_price: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
    pub days_to_expiry: u32,
    pub notional: f64,
    pub leverage: f64,
    pub gearing_limit: usize,
    pub product_type: ProductType,
    pub frequency: Frequency,
}

impl ValuationRequest {
    pub fn market_state(&self) -> MarketState {
        MarketState::new(
            self.spot_price,
            self.volatility,
            self.risk_free_rate,
            f64::from(self.days_to_expiry),
        )
    }

    pub fn contract_terms(&self) -> ContractTerms {
        ContractTerms {
            strike_price: self.strike_price,
            barrier_price: self.ko_price,
            notional: self.notional,
            leverage: self.leverage,
            gearing_limit: self.gearing_limit,
            product_type: self.product_type,
            frequency: self.frequency,
        }
    }
}

/// A valuation request plus the free parameter the solver should zero the
/// NPV over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(flatten)]
    pub valuation: ValuationRequest,
    pub target_param: SolveTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_request_wire_format() {
        let json = r#"{
            "spot_price": 100.0,
            "strike_price": 98.0,
            "ko_price": 110.0,
            "volatility": 0.25,
            "risk_free_rate": 0.04,
            "days_to_expiry": 90,
            "notional": 1000000.0,
            "leverage": 2.0,
            "gearing_limit": 10,
            "product_type": "Accumulator",
            "frequency": "Weekly",
            "target_param": "ko_price"
        }"#;
        let req: SolveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target_param, SolveTarget::Barrier);
        assert_eq!(req.valuation.frequency, Frequency::Weekly);
        assert_eq!(req.valuation.contract_terms().barrier_price, 110.0);

        let round_trip = serde_json::to_string(&req).unwrap();
        assert!(round_trip.contains("\"target_param\":\"ko_price\""));
    }
}
