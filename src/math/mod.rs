//! Arithmetic for the share ledger and the JIT position sizing.
//!
//! This module provides the ledger's bootstrap/ratio rules
//! ([`shares_for_deposit`], [`amount_for_shares`]), tick math helpers for
//! the facility's exponential price grid, and the liquidity ⇄ amounts
//! conversions used to size ephemeral positions.

mod liquidity_math;
mod share_math;
mod tick_math;

pub use liquidity_math::{amounts_for_liquidity, liquidity_for_amounts};
pub use share_math::{amount_for_shares, shares_for_deposit};
pub use tick_math::{price_at_tick, sqrt_price_at_tick, tick_at_price};
