//! Tick-to-price conversion for the facility's exponential price grid.
//!
//! These helpers implement the standard relationship `price = 1.0001^tick`
//! used by concentrated-liquidity trading facilities.
//!
//! # Functions
//!
//! - [`price_at_tick`] — computes `1.0001^tick` for a given [`Tick`].
//! - [`tick_at_price`] — computes the greatest tick whose price ≤ the
//!   given [`Price`].
//! - [`sqrt_price_at_tick`] — computes `1.0001^(tick/2)`, the sqrt-price
//!   coordinate position sizing works in.
//!
//! # Precision
//!
//! `f64` arithmetic (`powf`, `ln`) with a snap-to-nearest adjustment that
//! guarantees round-trip correctness: `tick_at_price(price_at_tick(t)) == t`
//! for all valid ticks.

use crate::domain::{Price, Tick};
use crate::error::VaultError;

/// Base of the tick-price exponential: `price = BASE^tick`.
const BASE: f64 = 1.0001;

/// Tolerance for snapping a floating-point tick value to the nearest
/// integer. This prevents round-trip errors caused by IEEE 754 rounding
/// when converting `tick → price → tick`.
const SNAP_EPSILON: f64 = 1e-9;

/// Computes the price at a given tick: `price = 1.0001^tick`.
///
/// All valid [`Tick`] values produce finite, positive prices within the
/// `f64` representable range.
///
/// # Errors
///
/// Returns [`VaultError::InvalidPrice`] if the computed price is not
/// finite or is negative (should not occur for valid ticks, but guarded
/// for safety).
#[must_use = "this returns the computed price and does not modify state"]
pub fn price_at_tick(tick: Tick) -> Result<Price, VaultError> {
    #[allow(clippy::cast_lossless)]
    let price_f64 = BASE.powf(tick.get() as f64);
    Price::new(price_f64)
}

/// Computes `sqrt(1.0001^tick)` = `1.0001^(tick/2)`.
///
/// This is the raw sqrt-price coordinate position sizing works in, not a
/// validated [`Price`].
#[must_use]
pub fn sqrt_price_at_tick(tick: Tick) -> f64 {
    #[allow(clippy::cast_lossless)]
    BASE.powf(tick.get() as f64 / 2.0)
}

/// Computes the greatest tick whose price is ≤ the given price.
///
/// Implements `floor(log_{1.0001}(price))` with a snap-to-nearest
/// adjustment (within `SNAP_EPSILON`) to guarantee round-trip correctness.
///
/// # Errors
///
/// - [`VaultError::InvalidPrice`] if `price` is zero (logarithm undefined).
/// - [`VaultError::InvalidTick`] if the resulting tick falls outside the
///   valid range.
#[must_use = "this returns the computed tick and does not modify state"]
pub fn tick_at_price(price: Price) -> Result<Tick, VaultError> {
    let p = price.get();
    if p <= 0.0 {
        return Err(VaultError::InvalidPrice(
            "price must be positive for tick conversion",
        ));
    }

    let raw = p.ln() / BASE.ln();

    // Snap to nearest integer when within epsilon to avoid round-trip
    // errors from IEEE 754 imprecision.
    let rounded = raw.round();
    let tick_f64 = if (raw - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        raw.floor()
    };

    if !tick_f64.is_finite() {
        return Err(VaultError::InvalidTick(
            "price produces non-finite tick value",
        ));
    }

    // Safe truncation: tick_f64 is finite after floor/round; values outside
    // i32 are caught by Tick::new().
    #[allow(clippy::cast_possible_truncation)]
    let tick_i32 = tick_f64 as i32;
    Tick::new(tick_i32)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick expected");
        };
        t
    }

    // -- price_at_tick ------------------------------------------------------

    #[test]
    fn tick_zero_gives_price_one() {
        let Ok(price) = price_at_tick(Tick::ZERO) else {
            panic!("expected Ok");
        };
        assert!((price.get() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn positive_tick_gives_price_above_one() {
        let Ok(price) = price_at_tick(tick(1_000)) else {
            panic!("expected Ok");
        };
        assert!(price.get() > 1.0);
    }

    #[test]
    fn negative_tick_gives_price_below_one() {
        let Ok(price) = price_at_tick(tick(-1_000)) else {
            panic!("expected Ok");
        };
        assert!(price.get() > 0.0 && price.get() < 1.0);
    }

    #[test]
    fn extreme_ticks_produce_finite_prices() {
        let Ok(min_p) = price_at_tick(Tick::MIN) else {
            panic!("expected Ok for MIN tick");
        };
        let Ok(max_p) = price_at_tick(Tick::MAX) else {
            panic!("expected Ok for MAX tick");
        };
        assert!(min_p.get() > 0.0);
        assert!(max_p.get() > 1.0);
        assert!(max_p.get().is_finite());
    }

    // -- sqrt_price_at_tick -------------------------------------------------

    #[test]
    fn sqrt_price_squares_to_price() {
        let t = tick(5_000);
        let Ok(price) = price_at_tick(t) else {
            panic!("expected Ok");
        };
        let sp = sqrt_price_at_tick(t);
        assert!((sp * sp - price.get()).abs() / price.get() < 1e-12);
    }

    #[test]
    fn sqrt_price_at_zero_is_one() {
        assert!((sqrt_price_at_tick(Tick::ZERO) - 1.0).abs() < f64::EPSILON);
    }

    // -- tick_at_price ------------------------------------------------------

    #[test]
    fn price_one_gives_tick_zero() {
        let Ok(t) = tick_at_price(Price::ONE) else {
            panic!("expected Ok");
        };
        assert_eq!(t, Tick::ZERO);
    }

    #[test]
    fn zero_price_rejected() {
        let Ok(zero) = Price::new(0.0) else {
            panic!("expected Ok");
        };
        assert!(tick_at_price(zero).is_err());
    }

    #[test]
    fn intermediate_price_floors() {
        // A price strictly between tick 0 and tick 1 floors to 0.
        let Ok(p) = Price::new(1.00005) else {
            panic!("expected Ok");
        };
        let Ok(t) = tick_at_price(p) else {
            panic!("expected Ok");
        };
        assert_eq!(t, Tick::ZERO);
    }

    #[test]
    fn round_trip_sample_ticks() {
        for v in [-887_272, -100_000, -1, 0, 1, 99_999, 887_272] {
            let t = tick(v);
            let Ok(price) = price_at_tick(t) else {
                panic!("expected Ok price for tick {v}");
            };
            let Ok(back) = tick_at_price(price) else {
                panic!("expected Ok tick for tick {v}");
            };
            assert_eq!(back, t, "round trip failed for tick {v}");
        }
    }

    #[test]
    fn huge_price_out_of_tick_range() {
        let Ok(p) = Price::new(f64::MAX / 2.0) else {
            panic!("expected Ok");
        };
        assert!(tick_at_price(p).is_err());
    }
}
