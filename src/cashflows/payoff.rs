use crate::instruments::contract::ProductType;
use crate::utils::errors::{AccumError, Result};

/// Signed cash flow and unit exposure of a single fixing. Units are positive
/// for accumulated (bought) notional and negative for decumulated (sold)
/// notional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixingPayoff {
    pub pnl: f64,
    pub units: f64,
}

/// Leverage multiplier actually applied at a fixing: the contractual
/// leverage only when the fixing is on the leveraged side of the strike and
/// still within the gearing limit, otherwise 1x.
pub fn effective_leverage(
    spot: f64,
    strike: f64,
    leverage: f64,
    is_geared: bool,
    product_type: ProductType,
) -> f64 {
    if is_geared && product_type.is_leveraged_side(spot, strike) {
        leverage
    } else {
        1.0
    }
}

/// # evaluate_fixing
/// Settles one fixing of an accumulator/decumulator. Shared verbatim between
/// the Monte Carlo engine and the historical replayer, so both price the
/// same economics:
///
/// * Accumulator: `pnl = n * (spot - strike) / spot`, long `n` units.
/// * Decumulator: `pnl = n * (strike - spot) / spot`, short `n` units.
///
/// where `n` is the notional scaled by [`effective_leverage`].
///
/// # Example
/// ```
/// use rustaccum::cashflows::payoff::evaluate_fixing;
/// use rustaccum::instruments::contract::ProductType;
///
/// let fixing =
///     evaluate_fixing(95.0, 100.0, 1_000.0, 2.0, true, ProductType::Accumulator).unwrap();
/// assert!((fixing.pnl - 2_000.0 * (95.0 - 100.0) / 95.0).abs() < 1e-12);
/// assert_eq!(fixing.units, 2_000.0);
/// ```
pub fn evaluate_fixing(
    spot: f64,
    strike: f64,
    notional: f64,
    leverage: f64,
    is_geared: bool,
    product_type: ProductType,
) -> Result<FixingPayoff> {
    if spot <= 0.0 {
        return Err(AccumError::InvalidMarketData(format!(
            "Fixing spot must be positive, got {}",
            spot
        )));
    }

    let amount = notional * effective_leverage(spot, strike, leverage, is_geared, product_type);
    let (pnl, units) = match product_type {
        ProductType::Accumulator => (amount * (spot - strike) / spot, amount),
        ProductType::Decumulator => (amount * (strike - spot) / spot, -amount),
    };
    Ok(FixingPayoff { pnl, units })
}
