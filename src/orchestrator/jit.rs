//! Liquidity orchestration: depositor surface and the JIT trade cycle.
//!
//! [`LiquidityOrchestrator`] owns the [`ShareVault`] and is its designated
//! operator. Depositors never touch the vault directly: `add_liquidity`
//! pulls their funds to the orchestrator account, deposits them for the
//! orchestrator account, and tracks each depositor's claim in a
//! contribution ledger. Keeping the orchestrator as the vault's sole
//! holder is what allows `before_trade` to stage the entire reserve by
//! redeeming the full share total through the ordinary withdraw API.
//!
//! # JIT Cycle
//!
//! The trade facility brackets every trade on a tracked pair:
//!
//! ```text
//! before_trade ─ select range ─ stage full reserve ─ size ─ open position
//!      │                                                        │
//!      └──────────────── [ trade body executes ] ───────────────┘
//! after_trade ── close position ── settle deltas ── redeposit balances
//! ```
//!
//! The full reserve is staged rather than a partial amount because the
//! orchestrator cannot predict how much of each asset a trade will consume
//! or produce; whatever the position does not need is redeposited when the
//! cycle ends. Redepositing mints at the ratio prevailing at that moment,
//! so fee income captured while the position was open raises the per-share
//! value for every current holder.
//!
//! # Failure Handling
//!
//! The facility guarantees that both hooks and the trade body form one
//! atomic unit. A failing `before_trade` restores the vault by
//! redepositing whatever it had staged before propagating; a failing
//! `after_trade` propagates directly — recovery for a half-completed cycle
//! belongs to the facility's atomic unit, not the orchestrator.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::config::OrchestratorConfig;
use crate::domain::{
    AccountId, Amount, AssetId, BalanceDelta, PairSpec, Rounding, Shares, TickRange,
};
use crate::error::VaultError;
use crate::math::{liquidity_for_amounts, sqrt_price_at_tick, tick_at_price};
use crate::orchestrator::TradeCycle;
use crate::traits::{AssetTransfer, TradeFacility};
use crate::vault::ShareVault;

/// User-facing liquidity surface plus the JIT cycle around trades.
///
/// See the [module documentation](self) for the custody model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityOrchestrator {
    /// The orchestrator's own account in the transfer primitive; also the
    /// vault's designated operator and sole share holder.
    account: AccountId,
    vault: ShareVault,
    /// Amounts contributed per `(asset, holder)` through `add_liquidity`,
    /// distinct from vault shares.
    contributions: BTreeMap<(AssetId, AccountId), Amount>,
    /// Outstanding contribution total per asset; the denominator of
    /// proportional redemption.
    contribution_totals: BTreeMap<AssetId, Amount>,
    /// Pairs with an ephemeral position currently open.
    open_positions: BTreeSet<(AssetId, AssetId)>,
}

impl LiquidityOrchestrator {
    /// Creates an orchestrator and its vault from a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`OrchestratorConfig::validate`].
    pub fn new(config: &OrchestratorConfig) -> Result<Self, VaultError> {
        config.validate()?;
        Ok(Self {
            account: config.account(),
            vault: ShareVault::new(config.vault())?,
            contributions: BTreeMap::new(),
            contribution_totals: BTreeMap::new(),
            open_positions: BTreeSet::new(),
        })
    }

    /// Returns the orchestrator's account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns a view of the owned vault.
    #[must_use]
    pub const fn vault(&self) -> &ShareVault {
        &self.vault
    }

    /// Returns the amount `holder` has contributed for `asset`.
    #[must_use]
    pub fn contribution(&self, asset: AssetId, holder: AccountId) -> Amount {
        self.contributions
            .get(&(asset, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Returns the outstanding contribution total for `asset`.
    #[must_use]
    pub fn contribution_total(&self, asset: AssetId) -> Amount {
        self.contribution_totals
            .get(&asset)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Returns `true` if an ephemeral position is open on `pair`.
    #[must_use]
    pub fn cycle_in_flight(&self, pair: &PairSpec) -> bool {
        self.open_positions.contains(&pair.key())
    }

    // -----------------------------------------------------------------------
    // Depositor surface
    // -----------------------------------------------------------------------

    /// Adds liquidity for `caller`: each nonzero leg is pulled from the
    /// caller, deposited into the vault, and recorded as a contribution.
    ///
    /// The two legs are independent; single-sided and unequal deposits are
    /// legal. A failure in either leg unwinds the completed one, leaving
    /// balances as before the call.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidArgument`] if `caller` is null.
    /// - [`VaultError::NoDeposit`] if both amounts are zero.
    /// - [`VaultError::Overflow`] if a contribution counter would overflow.
    /// - [`VaultError::TransferFailure`] if a pull is rejected.
    /// - Any error from [`ShareVault::deposit`].
    pub fn add_liquidity(
        &mut self,
        caller: AccountId,
        pair: &PairSpec,
        amount0: Amount,
        amount1: Amount,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<(), VaultError> {
        if caller.is_zero() {
            return Err(VaultError::InvalidArgument("caller must be non-null"));
        }
        if amount0.is_zero() && amount1.is_zero() {
            return Err(VaultError::NoDeposit);
        }

        let legs: Vec<(AssetId, Amount)> = [(pair.first(), amount0), (pair.second(), amount1)]
            .into_iter()
            .filter(|(_, a)| !a.is_zero())
            .collect();

        // Stage the contribution updates first so the commit below cannot
        // fail after external movements have happened.
        let mut staged: Vec<(AssetId, Amount, Amount)> = Vec::with_capacity(legs.len());
        for (asset, amount) in &legs {
            let entry = self
                .contribution(*asset, caller)
                .checked_add(amount)
                .ok_or(VaultError::Overflow("contribution"))?;
            let total = self
                .contribution_total(*asset)
                .checked_add(amount)
                .ok_or(VaultError::Overflow("contribution total"))?;
            staged.push((*asset, entry, total));
        }

        let mut completed: Vec<(AssetId, Shares)> = Vec::with_capacity(legs.len());
        for (asset, amount) in &legs {
            if let Err(e) = transfer.transfer_from(*asset, caller, self.account, *amount) {
                self.unwind_deposits(caller, &completed, transfer);
                return Err(e);
            }
            match self
                .vault
                .deposit(self.account, *asset, self.account, *amount, transfer)
            {
                Ok(shares) => completed.push((*asset, shares)),
                Err(e) => {
                    let _ = transfer.transfer(*asset, self.account, caller, *amount);
                    self.unwind_deposits(caller, &completed, transfer);
                    return Err(e);
                }
            }
        }

        for (asset, entry, total) in staged {
            self.contributions.insert((asset, caller), entry);
            self.contribution_totals.insert(asset, total);
        }

        for (asset, amount) in &legs {
            debug!(
                caller = ?caller,
                asset = ?asset,
                amount = %amount,
                "liquidity added"
            );
        }
        Ok(())
    }

    /// Removes liquidity for `caller`: each nonzero leg redeems the
    /// caller's proportional slice of the orchestrator's share holdings
    /// and forwards the redeemed amount.
    ///
    /// A leg withdrawing contribution amount `a` redeems
    /// `floor(a · held_shares / contribution_total)` shares, so fee income
    /// accrued while the contribution was outstanding is distributed
    /// pro-rata rather than captured by whoever withdraws last.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidArgument`] if `caller` is null or both
    ///   amounts are zero.
    /// - [`VaultError::InsufficientContribution`] if a leg exceeds the
    ///   caller's contribution.
    /// - [`VaultError::InsufficientShares`] if a leg's proportional share
    ///   count floors to zero.
    /// - Any error from [`ShareVault::withdraw`] or the transfer primitive.
    pub fn remove_liquidity(
        &mut self,
        caller: AccountId,
        pair: &PairSpec,
        amount0: Amount,
        amount1: Amount,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<(), VaultError> {
        if caller.is_zero() {
            return Err(VaultError::InvalidArgument("caller must be non-null"));
        }
        if amount0.is_zero() && amount1.is_zero() {
            return Err(VaultError::InvalidArgument("nothing to remove"));
        }

        // Plan both legs up front: all precondition failures happen before
        // any external movement.
        struct Leg {
            asset: AssetId,
            shares: Shares,
            new_entry: Amount,
            new_total: Amount,
        }
        let mut legs: Vec<Leg> = Vec::with_capacity(2);
        for (asset, amount) in [(pair.first(), amount0), (pair.second(), amount1)] {
            if amount.is_zero() {
                continue;
            }
            let entry = self.contribution(asset, caller);
            if entry < amount {
                return Err(VaultError::InsufficientContribution);
            }
            let total = self.contribution_total(asset);
            let held = self.vault.share_balance(asset, self.account);
            let shares = amount
                .checked_mul_div(held.get(), total.get(), Rounding::Down)
                .ok_or(VaultError::Overflow("proportional redemption"))?;
            let shares = Shares::new(shares.get());
            if shares.is_zero() {
                return Err(VaultError::InsufficientShares);
            }
            // Cannot underflow: entry ≥ amount and total ≥ entry.
            let new_entry = entry
                .checked_sub(&amount)
                .ok_or(VaultError::Overflow("contribution"))?;
            let new_total = total
                .checked_sub(&amount)
                .ok_or(VaultError::Overflow("contribution total"))?;
            legs.push(Leg {
                asset,
                shares,
                new_entry,
                new_total,
            });
        }

        // Phase 1: redeem all legs into orchestrator custody.
        let mut redeemed: Vec<(AssetId, Amount)> = Vec::with_capacity(legs.len());
        for leg in &legs {
            match self
                .vault
                .withdraw(self.account, leg.asset, self.account, leg.shares, transfer)
            {
                Ok(out) => redeemed.push((leg.asset, out)),
                Err(e) => {
                    self.unwind_redemptions(&redeemed, transfer);
                    return Err(e);
                }
            }
        }

        // Phase 2: forward the redeemed amounts to the caller.
        let mut forwarded: Vec<(AssetId, Amount)> = Vec::with_capacity(redeemed.len());
        for (asset, out) in &redeemed {
            if out.is_zero() {
                continue;
            }
            if let Err(e) = transfer.transfer(*asset, self.account, caller, *out) {
                // Claw back what already reached the caller, then return
                // everything still in custody to the vault.
                for (sent_asset, sent) in &forwarded {
                    let _ = transfer.transfer_from(*sent_asset, caller, self.account, *sent);
                }
                let still_held: Vec<(AssetId, Amount)> = redeemed.clone();
                self.unwind_redemptions(&still_held, transfer);
                return Err(e);
            }
            forwarded.push((*asset, *out));
        }

        for leg in &legs {
            self.contributions.insert((leg.asset, caller), leg.new_entry);
            self.contribution_totals.insert(leg.asset, leg.new_total);
            debug!(
                caller = ?caller,
                asset = ?leg.asset,
                shares = %leg.shares,
                "liquidity removed"
            );
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // JIT cycle
    // -----------------------------------------------------------------------

    /// Prepares an ephemeral position immediately before a trade on `pair`.
    ///
    /// Selects the range (the hint verbatim, else one granularity step
    /// around the current price), stages the entire vault reserve of both
    /// assets, computes the maximum supportable position, and opens it.
    /// When the staged balances cannot straddle the range the staged
    /// capital is redeposited at once and the cycle stays idle — the
    /// normal path for an empty vault, not an error.
    ///
    /// # Errors
    ///
    /// - [`VaultError::ReentrancyRejected`] if a cycle is already in
    ///   flight on this pair.
    /// - [`VaultError::UninitializedPair`] if the facility has no price.
    /// - Any error from range derivation, staging, sizing, opening, or
    ///   settlement. Everything the orchestrator still holds is returned
    ///   to the vault before the error propagates; the facility then
    ///   aborts the surrounding trade, so the failed cycle has no lasting
    ///   effect.
    pub fn before_trade(
        &mut self,
        pair: &PairSpec,
        range_hint: Option<TickRange>,
        transfer: &mut dyn AssetTransfer,
        facility: &mut dyn TradeFacility,
    ) -> Result<TradeCycle, VaultError> {
        if self.open_positions.contains(&pair.key()) {
            return Err(VaultError::ReentrancyRejected);
        }

        let price = facility.current_price(pair)?;
        let range = match range_hint {
            Some(r) => r,
            None => TickRange::single_spacing(tick_at_price(price)?, pair.tick_spacing())?,
        };

        // Stage the entire reserve of both assets. An asset with no shares
        // outstanding is skipped, not an error.
        for asset in [pair.first(), pair.second()] {
            let total = self.vault.total_shares(asset);
            if total.is_zero() {
                continue;
            }
            if let Err(e) =
                self.vault
                    .withdraw(self.account, asset, self.account, total, transfer)
            {
                let _ = self.redeposit_balances(pair, transfer);
                return Err(e);
            }
        }

        let staged_a = transfer.balance_of(pair.first(), self.account);
        let staged_b = transfer.balance_of(pair.second(), self.account);

        let liquidity = match liquidity_for_amounts(
            price.sqrt(),
            sqrt_price_at_tick(range.lower()),
            sqrt_price_at_tick(range.upper()),
            staged_a,
            staged_b,
        ) {
            Ok(l) => l,
            Err(e) => {
                let _ = self.redeposit_balances(pair, transfer);
                return Err(e);
            }
        };

        if liquidity == 0 {
            self.redeposit_balances(pair, transfer)?;
            debug!(pair = ?pair.key(), "trade cycle idle: no deployable position");
            return Ok(TradeCycle::new(*pair, range, 0));
        }

        #[allow(clippy::cast_possible_wrap)]
        let signed_size = if liquidity <= i128::MAX as u128 {
            liquidity as i128
        } else {
            let _ = self.redeposit_balances(pair, transfer);
            return Err(VaultError::Overflow("position size"));
        };

        let delta = match facility.adjust_position(pair, range, signed_size) {
            Ok(d) => d,
            Err(e) => {
                let _ = self.redeposit_balances(pair, transfer);
                return Err(e);
            }
        };
        if let Err(e) = self.settle(pair, delta, facility.account(), transfer) {
            let _ = self.redeposit_balances(pair, transfer);
            return Err(e);
        }

        self.open_positions.insert(pair.key());
        info!(
            actor = ?self.account,
            pair = ?pair.key(),
            liquidity,
            range = %range,
            "ephemeral position opened"
        );
        Ok(TradeCycle::new(*pair, range, liquidity))
    }

    /// Closes the cycle immediately after the trade executes.
    ///
    /// A cycle that opened no position is a no-op. Otherwise the position
    /// is fully closed, deltas are settled, and the orchestrator's entire
    /// final balances of both assets are redeposited — the staged capital
    /// adjusted by whatever fees and price movement the position captured.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidArgument`] if the cycle claims an open
    ///   position the orchestrator does not know about.
    /// - Any error from closing, settlement, or redeposit. Errors
    ///   propagate without an unwind: the facility's atomic unit covers
    ///   both hooks and the trade body, and the orchestrator has no
    ///   independent recovery path for a half-completed cycle.
    pub fn after_trade(
        &mut self,
        cycle: TradeCycle,
        transfer: &mut dyn AssetTransfer,
        facility: &mut dyn TradeFacility,
    ) -> Result<(), VaultError> {
        if !cycle.position_open() {
            return Ok(());
        }
        let pair = *cycle.pair();
        if !self.open_positions.contains(&pair.key()) {
            return Err(VaultError::InvalidArgument(
                "no cycle in flight for this pair",
            ));
        }

        // The open path guarantees the size fits in i128.
        #[allow(clippy::cast_possible_wrap)]
        let signed_size = cycle.liquidity() as i128;
        let delta = facility.adjust_position(&pair, cycle.range(), -signed_size)?;
        self.settle(&pair, delta, facility.account(), transfer)?;

        self.redeposit_balances(&pair, transfer)?;
        self.open_positions.remove(&pair.key());
        info!(
            actor = ?self.account,
            pair = ?pair.key(),
            liquidity = cycle.liquidity(),
            "ephemeral position closed, balances redeposited"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Deposits the orchestrator's full current balance of both pair
    /// assets back into the vault.
    fn redeposit_balances(
        &mut self,
        pair: &PairSpec,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<(), VaultError> {
        for asset in [pair.first(), pair.second()] {
            let balance = transfer.balance_of(asset, self.account);
            if balance.is_zero() {
                continue;
            }
            self.vault
                .deposit(self.account, asset, self.account, balance, transfer)?;
        }
        Ok(())
    }

    /// Settles a position-adjustment delta: negative components are pushed
    /// to the facility, positive components are pulled from it.
    fn settle(
        &self,
        pair: &PairSpec,
        delta: BalanceDelta,
        facility_account: AccountId,
        transfer: &mut dyn AssetTransfer,
    ) -> Result<(), VaultError> {
        for (asset, component) in [
            (pair.first(), delta.delta_a()),
            (pair.second(), delta.delta_b()),
        ] {
            if let Some(owed) = BalanceDelta::owed(component)? {
                transfer.transfer(asset, self.account, facility_account, owed)?;
            } else if let Some(credited) = BalanceDelta::credited(component) {
                transfer.transfer_from(asset, facility_account, self.account, credited)?;
            }
        }
        Ok(())
    }

    /// Best-effort unwind of completed `add_liquidity` legs: redeem the
    /// minted shares and return the proceeds to the caller. The original
    /// failure is what the caller sees.
    fn unwind_deposits(
        &mut self,
        caller: AccountId,
        completed: &[(AssetId, Shares)],
        transfer: &mut dyn AssetTransfer,
    ) {
        for (asset, shares) in completed {
            if let Ok(returned) =
                self.vault
                    .withdraw(self.account, *asset, self.account, *shares, transfer)
            {
                let _ = transfer.transfer(*asset, self.account, caller, returned);
            }
        }
    }

    /// Best-effort unwind of completed `remove_liquidity` redemptions:
    /// deposit the redeemed amounts back into the vault.
    fn unwind_redemptions(
        &mut self,
        redeemed: &[(AssetId, Amount)],
        transfer: &mut dyn AssetTransfer,
    ) {
        for (asset, out) in redeemed {
            if out.is_zero() {
                continue;
            }
            let _ = self
                .vault
                .deposit(self.account, *asset, self.account, *out, transfer);
        }
    }
}
