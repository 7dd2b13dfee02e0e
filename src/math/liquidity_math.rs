//! Conversions between range liquidity and asset amounts.
//!
//! Within a range `[√Pl, √Pu)` at current sqrt-price `√P`, a position of
//! liquidity `L` is collateralized by:
//!
//! ```text
//! amount_a = L · (1/√P − 1/√Pu)      (√P clamped into the range)
//! amount_b = L · (√P − √Pl)
//! ```
//!
//! When the price sits below the range the position is entirely asset A;
//! above the range it is entirely asset B. [`liquidity_for_amounts`]
//! inverts the relationship: the largest `L` the given balances can
//! collateralize at the current price. This is the sizing function of the
//! JIT cycle — staged balances in, maximum supportable position out.

use crate::domain::Amount;
use crate::error::VaultError;

/// Validates the sqrt-price coordinates shared by both conversions.
fn check_bounds(sqrt_price: f64, sqrt_lower: f64, sqrt_upper: f64) -> Result<(), VaultError> {
    if !(sqrt_lower.is_finite() && sqrt_upper.is_finite() && sqrt_lower > 0.0) {
        return Err(VaultError::InvalidTickRange(
            "range sqrt-prices must be finite and positive",
        ));
    }
    if sqrt_upper <= sqrt_lower {
        return Err(VaultError::InvalidTickRange(
            "range upper sqrt-price must exceed lower",
        ));
    }
    if !sqrt_price.is_finite() || sqrt_price < 0.0 {
        return Err(VaultError::InvalidPrice(
            "current sqrt-price must be finite and non-negative",
        ));
    }
    Ok(())
}

/// Computes the maximum liquidity the given balances can collateralize
/// within `[sqrt_lower, sqrt_upper)` at `sqrt_price`.
///
/// Deterministic in its inputs. Returns zero when the balances cannot
/// meaningfully straddle the range — an in-range price with either balance
/// empty, or a one-sided price with the required side empty.
///
/// # Errors
///
/// - [`VaultError::InvalidTickRange`] if the range coordinates are not
///   finite, positive, and ordered.
/// - [`VaultError::InvalidPrice`] if `sqrt_price` is not finite and
///   non-negative.
pub fn liquidity_for_amounts(
    sqrt_price: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
    amount_a: Amount,
    amount_b: Amount,
) -> Result<u128, VaultError> {
    check_bounds(sqrt_price, sqrt_lower, sqrt_upper)?;

    #[allow(clippy::cast_precision_loss)]
    let (a, b) = (amount_a.get() as f64, amount_b.get() as f64);

    let liquidity = if sqrt_price <= sqrt_lower {
        // Entirely asset A: amount_a = L · (√Pu − √Pl) / (√Pl · √Pu)
        a * sqrt_lower * sqrt_upper / (sqrt_upper - sqrt_lower)
    } else if sqrt_price >= sqrt_upper {
        // Entirely asset B: amount_b = L · (√Pu − √Pl)
        b / (sqrt_upper - sqrt_lower)
    } else {
        let l_from_a = a * sqrt_price * sqrt_upper / (sqrt_upper - sqrt_price);
        let l_from_b = b / (sqrt_price - sqrt_lower);
        l_from_a.min(l_from_b)
    };

    if !liquidity.is_finite() || liquidity < 1.0 {
        return Ok(0);
    }
    // Shaved by one part per billion: the ceil-rounded collateral for the
    // returned size must never exceed the balances it was computed from,
    // even after f64 rounding in both directions.
    let liquidity = liquidity * (1.0 - 1e-9);
    #[allow(clippy::cast_precision_loss)]
    let max = u128::MAX as f64;
    if liquidity >= max {
        return Err(VaultError::Overflow("position size"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(liquidity.floor() as u128)
}

/// Computes the asset amounts collateralizing `liquidity` within
/// `[sqrt_lower, sqrt_upper)` at `sqrt_price`, rounding up.
///
/// The inverse of [`liquidity_for_amounts`]; rounding up means the result
/// never understates what a position of this size requires.
///
/// # Errors
///
/// - [`VaultError::InvalidTickRange`] / [`VaultError::InvalidPrice`] on
///   invalid coordinates.
/// - [`VaultError::Overflow`] if a computed amount exceeds `u128`.
pub fn amounts_for_liquidity(
    sqrt_price: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
    liquidity: u128,
) -> Result<(Amount, Amount), VaultError> {
    check_bounds(sqrt_price, sqrt_lower, sqrt_upper)?;

    #[allow(clippy::cast_precision_loss)]
    let l = liquidity as f64;

    // Clamp the price into the range: outside it the position is one-sided.
    let sp = sqrt_price.clamp(sqrt_lower, sqrt_upper);

    let raw_a = l * (1.0 / sp - 1.0 / sqrt_upper);
    let raw_b = l * (sp - sqrt_lower);

    to_amount(raw_a).and_then(|a| to_amount(raw_b).map(|b| (a, b)))
}

/// Converts a non-negative `f64` amount to [`Amount`], rounding up.
fn to_amount(raw: f64) -> Result<Amount, VaultError> {
    if !raw.is_finite() || raw < 0.0 {
        return Err(VaultError::Overflow("liquidity amount conversion"));
    }
    let ceiled = raw.ceil();
    #[allow(clippy::cast_precision_loss)]
    let max = u128::MAX as f64;
    if ceiled >= max {
        return Err(VaultError::Overflow("liquidity amount conversion"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(Amount::new(ceiled as u128))
}
