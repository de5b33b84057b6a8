use serde::{Deserialize, Serialize};

use crate::time::schedule::Frequency;
use crate::utils::errors::{AccumError, Result};

/// Direction of the structure. An accumulator obliges the client to buy the
/// underlying at the strike (leveraged below strike); a decumulator obliges
/// the client to sell (leveraged above strike).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Accumulator,
    Decumulator,
}

impl ProductType {
    /// Whether `spot` breaches the knock-out barrier. Accumulators knock out
    /// on the upside, decumulators on the downside.
    pub fn is_knock_out(&self, spot: f64, barrier: f64) -> bool {
        match self {
            ProductType::Accumulator => spot >= barrier,
            ProductType::Decumulator => spot <= barrier,
        }
    }

    /// Whether a fixing at `spot` is on the leveraged side of the strike.
    pub fn is_leveraged_side(&self, spot: f64, strike: f64) -> bool {
        match self {
            ProductType::Accumulator => spot < strike,
            ProductType::Decumulator => spot > strike,
        }
    }
}

/// Economic terms of an accumulator/decumulator contract. Immutable for the
/// lifetime of a request; the solver derives candidate copies through the
/// `with_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub strike_price: f64,
    pub barrier_price: f64,
    pub notional: f64,
    pub leverage: f64,
    /// Count of geared fixings before the multiplier reverts to 1x.
    pub gearing_limit: usize,
    pub product_type: ProductType,
    pub frequency: Frequency,
}

impl ContractTerms {
    pub fn validate(&self) -> Result<()> {
        if self.strike_price <= 0.0 || self.barrier_price <= 0.0 {
            return Err(AccumError::InvalidMarketData(format!(
                "Strike and barrier must be positive, got strike {} barrier {}",
                self.strike_price, self.barrier_price
            )));
        }
        Ok(())
    }

    pub fn with_strike(&self, strike_price: f64) -> Self {
        Self {
            strike_price,
            ..*self
        }
    }

    pub fn with_barrier(&self, barrier_price: f64) -> Self {
        Self {
            barrier_price,
            ..*self
        }
    }

    pub fn with_leverage(&self, leverage: f64) -> Self {
        Self { leverage, ..*self }
    }
}
