//! Bootstrap and ratio rules of the proportional-share ledger.
//!
//! Two functions carry the entire value relationship between deposits,
//! shares, and the reserve:
//!
//! - [`shares_for_deposit`] — how many shares a deposit mints.
//! - [`amount_for_shares`] — how much of the reserve a redemption returns.
//!
//! # Rounding Convention
//!
//! Both directions floor ([`Rounding::Down`]), so the remainder of every
//! division stays with the vault. Under this convention no sequence of
//! deposits and withdrawals can net-extract value from the other holders,
//! regardless of interleaving.

use crate::domain::{Amount, Rounding, Shares};
use crate::error::VaultError;

/// Computes the shares minted for depositing `amount` into a vault whose
/// asset currently has `total_shares` outstanding against `reserve`.
///
/// # Rules
///
/// - **Bootstrap**: if `total_shares` or `reserve` is zero, the deposit
///   mints exactly `amount` shares (1:1).
/// - **Ratio**: otherwise it mints `floor(amount · total_shares / reserve)`.
///
/// A ratio mint may floor to zero shares; the amount then accrues to the
/// existing holders. Rounding never favors the depositor.
///
/// # Errors
///
/// Returns [`VaultError::Overflow`] if `amount · total_shares` exceeds
/// `u128` — the mint fails rather than wraps.
pub fn shares_for_deposit(
    amount: Amount,
    total_shares: Shares,
    reserve: Amount,
) -> Result<Shares, VaultError> {
    if total_shares.is_zero() || reserve.is_zero() {
        return Ok(Shares::new(amount.get()));
    }
    amount
        .checked_mul_div(total_shares.get(), reserve.get(), Rounding::Down)
        .map(|a| Shares::new(a.get()))
        .ok_or(VaultError::Overflow("share mint"))
}

/// Computes the reserve amount returned for redeeming `shares` from a vault
/// whose asset has `total_shares` outstanding against `reserve`:
/// `floor(shares · reserve / total_shares)`.
///
/// Rounding never favors the redeemer; the remainder stays with the vault's
/// remaining holders.
///
/// # Errors
///
/// - [`VaultError::DivisionByZero`] if `total_shares` is zero.
/// - [`VaultError::Overflow`] if `shares · reserve` exceeds `u128`.
pub fn amount_for_shares(
    shares: Shares,
    total_shares: Shares,
    reserve: Amount,
) -> Result<Amount, VaultError> {
    if total_shares.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    reserve
        .checked_mul_div(shares.get(), total_shares.get(), Rounding::Down)
        .ok_or(VaultError::Overflow("share redemption"))
}
