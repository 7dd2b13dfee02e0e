//! Property-based tests using `proptest` for crate invariant validation.
//!
//! Covers five properties:
//!
//! 1. **Share-sum invariant** — `TotalShares(asset) == Σ ShareBalance`
//!    after any interleaving of deposits and withdrawals.
//! 2. **No net extraction** — depositing then redeeming the minted shares
//!    returns at most the deposited amount, for any prior vault state.
//! 3. **Mint/redeem duality** — a redemption never pays out more than the
//!    proportional reserve slice of the redeemed shares.
//! 4. **Tick consistency** — `tick_at_price(price_at_tick(t)) == t` across
//!    the whole grid.
//! 5. **Sizing consistency** — the collateral required by the computed
//!    maximum position never exceeds the balances it was sized from.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use crate::config::VaultConfig;
use crate::domain::{AccountId, Amount, AssetId, Shares};
use crate::error::VaultError;
use crate::traits::AssetTransfer;
use crate::vault::ShareVault;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Minimal in-memory transfer primitive for property runs.
struct PropLedger {
    balances: BTreeMap<(AssetId, AccountId), u128>,
}

impl PropLedger {
    fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
        }
    }

    fn mint(&mut self, asset: AssetId, holder: AccountId, amount: u128) {
        *self.balances.entry((asset, holder)).or_insert(0) += amount;
    }
}

impl AssetTransfer for PropLedger {
    fn transfer_from(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), VaultError> {
        self.transfer(asset, from, to, amount)
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), VaultError> {
        let src = self.balances.entry((asset, from)).or_insert(0);
        if *src < amount.get() {
            return Err(VaultError::TransferFailure("insufficient balance"));
        }
        *src -= amount.get();
        *self.balances.entry((asset, to)).or_insert(0) += amount.get();
        Ok(())
    }

    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount {
        Amount::new(self.balances.get(&(asset, holder)).copied().unwrap_or(0))
    }
}

fn the_asset() -> AssetId {
    AssetId::from_bytes([10u8; 32])
}

fn operator() -> AccountId {
    AccountId::from_bytes([2u8; 32])
}

fn holder(idx: u8) -> AccountId {
    AccountId::from_bytes([100 + idx; 32])
}

fn fresh_vault() -> ShareVault {
    #[allow(clippy::unwrap_used)]
    let cfg = VaultConfig::new(AccountId::from_bytes([1u8; 32]), operator()).unwrap();
    #[allow(clippy::unwrap_used)]
    ShareVault::new(&cfg).unwrap()
}

fn share_sum(vault: &ShareVault, holders: &[AccountId]) -> u128 {
    holders
        .iter()
        .map(|h| vault.share_balance(the_asset(), *h).get())
        .sum()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// One ledger operation: deposit (true) or withdraw (false), by one of four
/// holders, with a bounded magnitude.
fn op_strategy() -> impl Strategy<Value = (bool, u8, u64)> {
    (any::<bool>(), 0u8..4u8, 1u64..=1_000_000u64)
}

/// Deposit amounts in [1, 10^12] to exercise both tiny and large mints.
fn amount_strategy() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000_000u64
}

/// Prior vault state: an initial deposit and an unminted reserve donation.
fn seed_strategy() -> impl Strategy<Value = (u64, u64)> {
    (1u64..=1_000_000u64, 0u64..=1_000_000u64)
}

proptest! {
    // Property 1: the share-sum invariant holds after every operation of
    // any deposit/withdraw interleaving.
    #[test]
    fn share_sum_invariant_under_interleavings(ops in prop::collection::vec(op_strategy(), 1..20)) {
        let mut vault = fresh_vault();
        let mut ledger = PropLedger::new();
        let holders: Vec<AccountId> = (0..4).map(holder).collect();
        for h in &holders {
            ledger.mint(the_asset(), *h, u128::from(u64::MAX));
        }

        for (is_deposit, who, magnitude) in ops {
            let account = holder(who);
            if is_deposit {
                let _ = vault.deposit(
                    operator(),
                    the_asset(),
                    account,
                    Amount::new(u128::from(magnitude)),
                    &mut ledger,
                );
            } else {
                let _ = vault.withdraw(
                    operator(),
                    the_asset(),
                    account,
                    Shares::new(u128::from(magnitude)),
                    &mut ledger,
                );
            }
            prop_assert_eq!(
                vault.total_shares(the_asset()).get(),
                share_sum(&vault, &holders)
            );
        }
    }

    // Property 2: deposit then redeem-everything-minted never nets more
    // than was deposited, for any seeded prior state.
    #[test]
    fn no_net_extraction((seed, donation) in seed_strategy(), amount in amount_strategy()) {
        let mut vault = fresh_vault();
        let mut ledger = PropLedger::new();
        ledger.mint(the_asset(), holder(0), u128::from(u64::MAX));
        ledger.mint(the_asset(), holder(1), u128::from(u64::MAX));

        // Seed a prior holder and an unminted donation (fee accrual).
        let seeded = vault.deposit(
            operator(),
            the_asset(),
            holder(0),
            Amount::new(u128::from(seed)),
            &mut ledger,
        );
        prop_assert!(seeded.is_ok());
        ledger.mint(the_asset(), vault.account(), u128::from(donation));

        let Ok(minted) = vault.deposit(
            operator(),
            the_asset(),
            holder(1),
            Amount::new(u128::from(amount)),
            &mut ledger,
        ) else {
            return Err(TestCaseError::fail("deposit should not fail"));
        };
        if minted.is_zero() {
            // Nothing minted: nothing to redeem, the amount was forfeited
            // to the vault. Extraction is impossible by construction.
            return Ok(());
        }

        let Ok(out) = vault.withdraw(operator(), the_asset(), holder(1), minted, &mut ledger)
        else {
            return Err(TestCaseError::fail("withdraw of minted shares should not fail"));
        };
        prop_assert!(
            out.get() <= u128::from(amount),
            "net extraction: in={} out={}",
            amount,
            out
        );
    }

    // Property 3: a partial redemption never exceeds the proportional
    // slice of the reserve.
    #[test]
    fn redemption_bounded_by_proportional_slice(
        (seed, donation) in seed_strategy(),
        burn in 1u64..=1_000_000u64,
    ) {
        let mut vault = fresh_vault();
        let mut ledger = PropLedger::new();
        ledger.mint(the_asset(), holder(0), u128::from(u64::MAX));

        let Ok(minted) = vault.deposit(
            operator(),
            the_asset(),
            holder(0),
            Amount::new(u128::from(seed)),
            &mut ledger,
        ) else {
            return Err(TestCaseError::fail("seed deposit should not fail"));
        };
        ledger.mint(the_asset(), vault.account(), u128::from(donation));

        let burn = Shares::new(u128::from(burn).min(minted.get()));
        let total = vault.total_shares(the_asset());
        let reserve = vault.reserve(the_asset(), &ledger);

        if let Ok(out) = vault.withdraw(operator(), the_asset(), holder(0), burn, &mut ledger) {
            // out == floor(burn · reserve / total); bounded inputs keep the
            // product far below u128::MAX.
            let exact = burn.get() * reserve.get() / total.get();
            prop_assert!(out.get() <= exact);
        }
    }

    // Property 4: tick → price → tick round-trips across the whole grid.
    #[test]
    fn tick_price_round_trip(v in -887_272i32..=887_272i32) {
        let Ok(t) = crate::domain::Tick::new(v) else {
            return Err(TestCaseError::fail("tick in range must construct"));
        };
        let Ok(price) = crate::math::price_at_tick(t) else {
            return Err(TestCaseError::fail("valid tick must price"));
        };
        let Ok(back) = crate::math::tick_at_price(price) else {
            return Err(TestCaseError::fail("valid price must convert back"));
        };
        prop_assert_eq!(back, t);
    }

    // Property 5: the collateral the computed maximum position requires
    // never exceeds the balances it was sized from.
    #[test]
    fn sizing_never_exceeds_balances(
        center in -100_000i32..=100_000i32,
        half_width in 1i32..=2_000i32,
        bal_a in 0u64..=1_000_000_000u64,
        bal_b in 0u64..=1_000_000_000u64,
    ) {
        let lower = crate::math::sqrt_price_at_tick(
            match crate::domain::Tick::new(center - half_width) {
                Ok(t) => t,
                Err(_) => return Ok(()),
            },
        );
        let upper = crate::math::sqrt_price_at_tick(
            match crate::domain::Tick::new(center + half_width) {
                Ok(t) => t,
                Err(_) => return Ok(()),
            },
        );
        let current = crate::math::sqrt_price_at_tick(
            match crate::domain::Tick::new(center) {
                Ok(t) => t,
                Err(_) => return Ok(()),
            },
        );

        let Ok(size) = crate::math::liquidity_for_amounts(
            current,
            lower,
            upper,
            Amount::new(u128::from(bal_a)),
            Amount::new(u128::from(bal_b)),
        ) else {
            return Err(TestCaseError::fail("sizing must not error on valid bounds"));
        };
        let Ok((need_a, need_b)) =
            crate::math::amounts_for_liquidity(current, lower, upper, size)
        else {
            return Err(TestCaseError::fail("amounts must not error on valid bounds"));
        };
        prop_assert!(need_a.get() <= u128::from(bal_a));
        prop_assert!(need_b.get() <= u128::from(bal_b));
    }
}
