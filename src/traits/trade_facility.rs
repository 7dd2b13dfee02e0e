//! Trade-execution seam between the orchestrator and the pricing engine.
//!
//! [`TradeFacility`] abstracts the external engine that prices and executes
//! trades. The facility brackets every trade on a tracked pair with the
//! orchestrator's hooks — `before_trade`, the trade body, `after_trade` —
//! inside one atomic unit: if either hook or the body fails, the whole
//! unit aborts, including pricing effects that already executed. The
//! orchestrator therefore has no independent recovery path for a
//! half-completed cycle and never retries internally.
//!
//! # Settlement Contract
//!
//! [`TradeFacility::adjust_position`] computes the position change and
//! returns the resulting per-asset balance deltas without moving funds
//! itself. The caller settles: negative components are pushed to the
//! facility's settlement account, positive components are pulled from it,
//! both through the [`AssetTransfer`](super::AssetTransfer) primitive.

use crate::domain::{AccountId, BalanceDelta, PairSpec, Price, TickRange};
use crate::error::VaultError;

/// External engine that prices trades and adjusts concentrated positions.
pub trait TradeFacility {
    /// Returns the current price indicator for `pair`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::UninitializedPair`] if the pair has no price
    /// set (never traded, or not registered).
    fn current_price(&self, pair: &PairSpec) -> Result<Price, VaultError>;

    /// Adjusts the caller's position on `pair` within `range` by the signed
    /// liquidity delta (positive opens, negative closes).
    ///
    /// Returns the signed per-asset balance deltas the adjustment produces
    /// from the caller's point of view; the caller settles them through the
    /// transfer primitive. Closing a position returns the principal plus
    /// any fees it accrued while open.
    ///
    /// # Errors
    ///
    /// - [`VaultError::UninitializedPair`] if the pair has no price set.
    /// - [`VaultError::InvalidArgument`] if the delta does not match an
    ///   adjustable position.
    fn adjust_position(
        &mut self,
        pair: &PairSpec,
        range: TickRange,
        liquidity_delta: i128,
    ) -> Result<BalanceDelta, VaultError>;

    /// Returns the facility's settlement account, the counterparty of all
    /// delta settlements.
    fn account(&self) -> AccountId;
}
