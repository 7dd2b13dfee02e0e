//! Ephemeral state of one trade cycle.

use core::fmt;

use crate::domain::{PairSpec, TickRange};

/// The transient outcome of a `before_trade` call, consumed by the
/// matching `after_trade`.
///
/// A cycle is a value, not a field: it is created at the start of
/// `before_trade`, threaded through the trade facility's call context, and
/// destroyed at the end of the matching `after_trade`. It never survives a
/// trade, so concurrent pairs cannot leak range or size into each other's
/// cycles.
///
/// A cycle with zero liquidity means no position was opened — the range
/// was selected but the staged balances could not straddle it (or there
/// was nothing to stage), and the matching `after_trade` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeCycle {
    pair: PairSpec,
    range: TickRange,
    liquidity: u128,
}

impl TradeCycle {
    /// Creates a cycle record. Only the orchestrator builds these.
    pub(crate) const fn new(pair: PairSpec, range: TickRange, liquidity: u128) -> Self {
        Self {
            pair,
            range,
            liquidity,
        }
    }

    /// Returns the pair this cycle concerns.
    #[must_use]
    pub const fn pair(&self) -> &PairSpec {
        &self.pair
    }

    /// Returns the ephemeral range selected for this cycle.
    #[must_use]
    pub const fn range(&self) -> TickRange {
        self.range
    }

    /// Returns the liquidity committed to the position (zero if none was
    /// opened).
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Returns `true` if this cycle opened a position.
    #[must_use]
    pub const fn position_open(&self) -> bool {
        self.liquidity > 0
    }
}

impl fmt::Display for TradeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TradeCycle(range={}, liquidity={})",
            self.range, self.liquidity
        )
    }
}
