use thiserror::Error;

/// Errors raised by the pricing core. All validation happens eagerly at the
/// entry point of each component; nothing is retried or suppressed internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccumError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Invalid tenor: {0}")]
    InvalidTenor(String),
    #[error("Invalid volatility: {0}")]
    InvalidVolatility(String),
    #[error("Invalid market data: {0}")]
    InvalidMarketData(String),
    #[error("No data found: {0}")]
    NoDataFound(String),
}

pub type Result<T> = std::result::Result<T, AccumError>;

impl From<AccumError> for String {
    fn from(e: AccumError) -> Self {
        e.to_string()
    }
}
