//! Asset-movement seam between the vault and the hosting platform.
//!
//! [`AssetTransfer`] abstracts the primitive that actually moves fungible
//! assets between holders. The vault and orchestrator never touch balances
//! directly — every custody change flows through this trait, which lets the
//! ledger mathematics run against an in-memory double in tests and against
//! the real platform primitive in production.
//!
//! # Atomicity Contract
//!
//! Implementations **must** either move the full amount or move nothing and
//! return [`VaultError::TransferFailure`]. Amounts use `u128` and
//! implementations must fail rather than silently wrap on overflow.
//!
//! A push via [`AssetTransfer::transfer`] from an account whose balance
//! covers `amount` must succeed unless the destination itself rejects the
//! asset; the vault's rollback paths rely on returning just-received funds.
//!
//! # Re-entrancy
//!
//! An implementation may invoke arbitrary callback code while moving an
//! asset. The vault guards itself with a per-asset in-progress marker, so
//! a callback that re-enters `deposit`/`withdraw` on the same asset is
//! rejected with [`VaultError::ReentrancyRejected`].

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::VaultError;

/// Primitive for moving a fungible asset between holders.
///
/// The trait is multi-asset: every operation names the asset it concerns.
/// There is no ambient caller identity in a library crate, so the paying
/// account is always explicit.
pub trait AssetTransfer {
    /// Pulls `amount` of `asset` from `from` into `to`'s custody.
    ///
    /// Models a pull against a prior authorization by `from`; an
    /// implementation may reject the pull if no such authorization exists
    /// or the balance is insufficient.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::TransferFailure`] if the primitive rejects the
    /// movement. No partial movement may remain.
    fn transfer_from(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), VaultError>;

    /// Pushes `amount` of `asset` out of `from`'s own custody to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::TransferFailure`] if the primitive rejects the
    /// movement. No partial movement may remain.
    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), VaultError>;

    /// Returns the current balance of `asset` held by `holder`.
    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount;
}
