use serde::{Deserialize, Serialize};

use crate::utils::errors::{AccumError, Result};

/// Trading days per year used to map calendar tenors onto simulation steps.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year used to convert `days_to_expiry` into a year
/// fraction for drift and discounting.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Market observables for a single valuation. The pricing core never mutates
/// a `MarketState`; the risk engine derives bumped copies through the
/// `with_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub spot_price: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
    pub days_to_expiry: f64,
}

impl MarketState {
    pub fn new(spot_price: f64, volatility: f64, risk_free_rate: f64, days_to_expiry: f64) -> Self {
        Self {
            spot_price,
            volatility,
            risk_free_rate,
            days_to_expiry,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.spot_price <= 0.0 {
            return Err(AccumError::InvalidMarketData(format!(
                "Spot price must be positive, got {}",
                self.spot_price
            )));
        }
        if self.volatility < 0.0 {
            return Err(AccumError::InvalidVolatility(format!(
                "Volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        if self.days_to_expiry < 0.0 {
            return Err(AccumError::InvalidTenor(format!(
                "Days to expiry must be non-negative, got {}",
                self.days_to_expiry
            )));
        }
        Ok(())
    }

    /// Year fraction to expiry on an Act/365 basis.
    pub fn time_to_expiry(&self) -> f64 {
        self.days_to_expiry / CALENDAR_DAYS_PER_YEAR
    }

    pub fn with_spot(&self, spot_price: f64) -> Self {
        Self { spot_price, ..*self }
    }

    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    pub fn with_rate(&self, risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..*self
        }
    }

    pub fn with_days_to_expiry(&self, days_to_expiry: f64) -> Self {
        Self {
            days_to_expiry,
            ..*self
        }
    }
}
