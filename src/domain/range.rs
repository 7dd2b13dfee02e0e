//! Price range for an ephemeral liquidity position.

use core::fmt;

use super::Tick;
use crate::error::VaultError;

/// A half-open tick range `[lower, upper)` for an ephemeral position.
///
/// Unlike a long-lived liquidity position, a range carries no liquidity of
/// its own: the size committed to it is ephemeral cycle state, decided
/// fresh from staged balances on every trade.
///
/// # Invariants
///
/// - `lower < upper` — the range must be non-empty.
/// - Both ticks are within the valid tick range (enforced by [`Tick`]).
///
/// # Examples
///
/// ```
/// use jit_vault::domain::{Tick, TickRange};
///
/// let lower = Tick::new(100).unwrap_or(Tick::ZERO);
/// let upper = Tick::new(160).unwrap_or(Tick::ZERO);
/// let range = TickRange::new(lower, upper);
/// assert!(range.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickRange {
    lower: Tick,
    upper: Tick,
}

impl TickRange {
    /// Creates a new `TickRange` with validated ordering.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidTickRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> crate::error::Result<Self> {
        if lower.get() >= upper.get() {
            return Err(VaultError::InvalidTickRange(
                "lower tick must be less than upper tick",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Derives the narrowest grid-aligned range containing `tick`: the tick
    /// floored to `spacing`, spanning exactly one spacing step above it.
    ///
    /// This is the default ephemeral range when the caller supplies no
    /// hint; one step is the narrowest range the facility's grid admits,
    /// which maximizes the capital efficiency of the position.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidTick`] if `spacing` is zero or the floored
    ///   lower bound leaves the valid tick range.
    /// - [`VaultError::InvalidTickRange`] if the upper bound would exceed
    ///   [`Tick::MAX`].
    pub const fn single_spacing(tick: Tick, spacing: u16) -> crate::error::Result<Self> {
        let lower = match tick.floor_to_spacing(spacing) {
            Ok(t) => t,
            Err(e) => return Err(e),
        };
        let upper = match lower.checked_add(spacing as i32) {
            Some(t) => t,
            None => {
                return Err(VaultError::InvalidTickRange(
                    "range upper bound exceeds maximum tick",
                ))
            }
        };
        Self::new(lower, upper)
    }

    /// Returns the lower tick boundary (inclusive).
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Returns the upper tick boundary (exclusive).
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Returns the width of the range in ticks (`upper - lower`).
    ///
    /// Always positive for a valid range.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper.get() - self.lower.get()
    }

    /// Returns `true` if `tick` falls within `[lower, upper)`.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        tick.get() >= self.lower.get() && tick.get() < self.upper.get()
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
