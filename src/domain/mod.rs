//! Fundamental domain value types used throughout the vault library.
//!
//! This module contains the core value types that model the domain:
//! assets, accounts, amounts, shares, prices, ticks, ranges, and balance
//! deltas. All types use newtypes with validated constructors to enforce
//! invariants.

mod account;
mod amount;
mod asset;
mod delta;
mod pair;
mod price;
mod range;
mod rounding;
mod shares;
mod tick;

pub use account::AccountId;
pub use amount::Amount;
pub use asset::AssetId;
pub use delta::BalanceDelta;
pub use pair::PairSpec;
pub use price::Price;
pub use range::TickRange;
pub use rounding::Rounding;
pub use shares::Shares;
pub use tick::Tick;
