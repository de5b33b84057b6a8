use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AccumError, Result};

/// One daily OHLC bar of a realized price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A (date, close) observation. The backtest replayer only consumes closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePrice {
    pub date: NaiveDate,
    pub close: f64,
}

impl From<&OhlcBar> for ClosePrice {
    fn from(bar: &OhlcBar) -> Self {
        Self {
            date: bar.date,
            close: bar.close,
        }
    }
}

/// Seam towards the external market data feed. Implementations live outside
/// the pricing core; an empty series is a caller-facing `NoDataFound` error,
/// never retried here.
pub trait MarketDataProvider {
    fn fetch_history(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<OhlcBar>>;

    fn fetch_latest(&self, ticker: &str) -> Result<ClosePrice>;
}

/// Store for historical bars keyed by ticker. Backs tests and embedders that
/// already hold their own price series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    history: HashMap<String, Vec<OhlcBar>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self {
            history: HashMap::new(),
        }
    }

    pub fn add_history(&mut self, ticker: &str, mut bars: Vec<OhlcBar>) {
        bars.sort_by_key(|b| b.date);
        self.history.insert(ticker.to_string(), bars);
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn fetch_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcBar>> {
        let bars: Vec<OhlcBar> = self
            .history
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        if bars.is_empty() {
            return Err(AccumError::NoDataFound(format!(
                "No data found for {} between {} and {}",
                ticker, start, end
            )));
        }
        Ok(bars)
    }

    fn fetch_latest(&self, ticker: &str) -> Result<ClosePrice> {
        self.history
            .get(ticker)
            .and_then(|bars| bars.last())
            .map(ClosePrice::from)
            .ok_or_else(|| AccumError::NoDataFound(format!("No data found for {}", ticker)))
    }
}
