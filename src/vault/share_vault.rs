//! Per-asset proportional-ownership ledger.
//!
//! [`ShareVault`] tracks, for every asset, the shares held by each account
//! and the total outstanding, while the asset reserve itself lives in the
//! transfer primitive under the vault's custody account. Share value is
//! implicit: one share redeems `reserve / total_shares` of the asset at
//! redemption time, so anything that grows the reserve without minting —
//! JIT fee income, donations — accrues to all current holders.
//!
//! # Mutation Discipline
//!
//! Every state change funnels through [`ShareVault::deposit`] and
//! [`ShareVault::withdraw`]. Both mutate the ledger first and move the
//! asset second; a rejected movement rolls the ledger back atomically, so
//! the vault never records shares for an asset movement that did not
//! happen. Both are restricted to the designated operator and reject
//! nested re-entry on the same asset, because the transfer primitive may
//! run arbitrary callback code while moving an asset.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::config::VaultConfig;
use crate::domain::{AccountId, Amount, AssetId, Shares};
use crate::error::VaultError;
use crate::math::{amount_for_shares, shares_for_deposit};
use crate::traits::AssetTransfer;

/// Multi-asset proportional-ownership ledger.
///
/// See the [module documentation](self) for the accounting model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareVault {
    /// Custody account holding the reserves in the transfer primitive.
    account: AccountId,
    /// The only account allowed to call `deposit`/`withdraw`.
    operator: AccountId,
    /// Total outstanding shares per asset.
    totals: BTreeMap<AssetId, Shares>,
    /// Shares held per `(asset, holder)`. Entries may remain at zero after
    /// a full withdrawal.
    balances: BTreeMap<(AssetId, AccountId), Shares>,
    /// Assets with an operation currently in progress.
    in_progress: BTreeSet<AssetId>,
}

impl ShareVault {
    /// Creates a new, empty vault from a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`VaultConfig::validate`].
    pub fn new(config: &VaultConfig) -> Result<Self, VaultError> {
        config.validate()?;
        Ok(Self {
            account: config.account(),
            operator: config.operator(),
            totals: BTreeMap::new(),
            balances: BTreeMap::new(),
            in_progress: BTreeSet::new(),
        })
    }

    /// Returns the vault's custody account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the total outstanding shares for `asset`.
    #[must_use]
    pub fn total_shares(&self, asset: AssetId) -> Shares {
        self.totals.get(&asset).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns the shares of `asset` held by `holder`.
    #[must_use]
    pub fn share_balance(&self, asset: AssetId, holder: AccountId) -> Shares {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// Returns the vault's current reserve of `asset`, observed through
    /// the transfer primitive rather than stored.
    #[must_use]
    pub fn reserve(&self, asset: AssetId, transfer: &dyn AssetTransfer) -> Amount {
        transfer.balance_of(asset, self.account)
    }

    /// Deposits `amount` of `asset` for `account`, minting shares.
    ///
    /// Shares follow the bootstrap/ratio rules of
    /// [`shares_for_deposit`]: 1:1 into an empty vault, otherwise
    /// `floor(amount · total / reserve)` — rounding favors the vault. The
    /// ledger is updated first, then `amount` is pulled from `account`
    /// into vault custody; a rejected pull rolls the ledger back.
    ///
    /// # Errors
    ///
    /// - [`VaultError::UnauthorizedCaller`] if `caller` is not the operator.
    /// - [`VaultError::InvalidArgument`] if `amount` is zero or `asset` /
    ///   `account` is null.
    /// - [`VaultError::ReentrancyRejected`] on nested entry for `asset`.
    /// - [`VaultError::Overflow`] if share totals would overflow.
    /// - [`VaultError::TransferFailure`] if the primitive rejects the pull;
    ///   the ledger is left unchanged.
    pub fn deposit(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<Shares, VaultError> {
        self.enter(caller, asset, account)?;
        let result = self.deposit_guarded(asset, account, amount, transfer);
        self.in_progress.remove(&asset);

        if let Ok(shares) = result {
            debug!(
                caller = ?caller,
                account = ?account,
                asset = ?asset,
                amount = %amount,
                shares = %shares,
                "vault deposit"
            );
        }
        result
    }

    /// Withdraws `shares` of `asset` for `account`, releasing the
    /// proportional reserve amount.
    ///
    /// The redemption follows [`amount_for_shares`]:
    /// `floor(shares · reserve / total)` — rounding favors the remaining
    /// holders. The ledger is updated first, then the amount is released
    /// to `account`; a rejected release rolls the ledger back.
    ///
    /// # Errors
    ///
    /// - [`VaultError::UnauthorizedCaller`] if `caller` is not the operator.
    /// - [`VaultError::InvalidArgument`] if `shares` is zero or `asset` /
    ///   `account` is null.
    /// - [`VaultError::ReentrancyRejected`] on nested entry for `asset`.
    /// - [`VaultError::InsufficientShares`] if `account` holds fewer than
    ///   `shares`.
    /// - [`VaultError::EmptyVault`] if the reserve is zero.
    /// - [`VaultError::TransferFailure`] if the primitive rejects the
    ///   release; the ledger is left unchanged.
    pub fn withdraw(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        account: AccountId,
        shares: Shares,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<Amount, VaultError> {
        self.enter(caller, asset, account)?;
        let result = self.withdraw_guarded(asset, account, shares, transfer);
        self.in_progress.remove(&asset);

        if let Ok(amount) = result {
            debug!(
                caller = ?caller,
                account = ?account,
                asset = ?asset,
                amount = %amount,
                shares = %shares,
                "vault withdraw"
            );
        }
        result
    }

    /// Shared entry validation: role, null arguments, re-entrancy marker.
    ///
    /// On success the marker for `asset` is set; the caller must clear it
    /// on every exit path.
    fn enter(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        account: AccountId,
    ) -> Result<(), VaultError> {
        if caller != self.operator {
            return Err(VaultError::UnauthorizedCaller);
        }
        if asset.is_zero() {
            return Err(VaultError::InvalidArgument("asset must be non-null"));
        }
        if account.is_zero() {
            return Err(VaultError::InvalidArgument("account must be non-null"));
        }
        if !self.in_progress.insert(asset) {
            return Err(VaultError::ReentrancyRejected);
        }
        Ok(())
    }

    fn deposit_guarded(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<Shares, VaultError> {
        if amount.is_zero() {
            return Err(VaultError::InvalidArgument(
                "deposit amount must be non-zero",
            ));
        }

        let reserve = transfer.balance_of(asset, self.account);
        let total = self.total_shares(asset);
        let balance = self.share_balance(asset, account);

        let shares = shares_for_deposit(amount, total, reserve)?;
        let new_total = total
            .checked_add(&shares)
            .ok_or(VaultError::Overflow("total shares"))?;
        let new_balance = balance
            .checked_add(&shares)
            .ok_or(VaultError::Overflow("share balance"))?;

        // Ledger first, asset movement second.
        self.totals.insert(asset, new_total);
        self.balances.insert((asset, account), new_balance);

        if let Err(e) = transfer.transfer_from(asset, account, self.account, amount) {
            // Roll back: never record shares for a movement that did not happen.
            self.totals.insert(asset, total);
            self.balances.insert((asset, account), balance);
            return Err(e);
        }

        Ok(shares)
    }

    fn withdraw_guarded(
        &mut self,
        asset: AssetId,
        account: AccountId,
        shares: Shares,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<Amount, VaultError> {
        if shares.is_zero() {
            return Err(VaultError::InvalidArgument(
                "withdrawal shares must be non-zero",
            ));
        }

        let balance = self.share_balance(asset, account);
        if balance < shares {
            return Err(VaultError::InsufficientShares);
        }

        let reserve = transfer.balance_of(asset, self.account);
        if reserve.is_zero() {
            return Err(VaultError::EmptyVault);
        }

        let total = self.total_shares(asset);
        let amount = amount_for_shares(shares, total, reserve)?;

        // balance ≤ total holds for every reachable state, so these cannot
        // underflow once the balance check passed.
        let new_total = total
            .checked_sub(&shares)
            .ok_or(VaultError::Overflow("total shares"))?;
        let new_balance = balance
            .checked_sub(&shares)
            .ok_or(VaultError::Overflow("share balance"))?;

        self.totals.insert(asset, new_total);
        self.balances.insert((asset, account), new_balance);

        if let Err(e) = transfer.transfer(asset, self.account, account, amount) {
            self.totals.insert(asset, total);
            self.balances.insert((asset, account), balance);
            return Err(e);
        }

        Ok(amount)
    }
}
