//! Configuration for the share vault.

use crate::domain::AccountId;
use crate::error::VaultError;

/// Immutable construction parameters of a [`ShareVault`](crate::vault::ShareVault).
///
/// # Validation
///
/// - `account` (the vault's custody account in the transfer primitive) must
///   be non-null.
/// - `operator` (the designated caller of `deposit`/`withdraw`; role grants
///   are administered externally) must be non-null and distinct from the
///   custody account, so the vault can never be the counterparty of its
///   own transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultConfig {
    account: AccountId,
    operator: AccountId,
}

impl VaultConfig {
    /// Creates a new `VaultConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if either account is
    /// null or the two coincide.
    pub fn new(account: AccountId, operator: AccountId) -> Result<Self, VaultError> {
        let config = Self { account, operator };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if either account is
    /// null or the two coincide.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.account.is_zero() {
            return Err(VaultError::InvalidConfiguration(
                "vault custody account must be non-null",
            ));
        }
        if self.operator.is_zero() {
            return Err(VaultError::InvalidConfiguration(
                "vault operator must be non-null",
            ));
        }
        if self.account == self.operator {
            return Err(VaultError::InvalidConfiguration(
                "vault custody account and operator must be distinct",
            ));
        }
        Ok(())
    }

    /// Returns the vault's custody account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the designated operator account.
    #[must_use]
    pub const fn operator(&self) -> AccountId {
        self.operator
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn acct(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = VaultConfig::new(acct(1), acct(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.account(), acct(1));
        assert_eq!(cfg.operator(), acct(2));
    }

    #[test]
    fn rejects_null_account() {
        assert!(VaultConfig::new(AccountId::zero(), acct(2)).is_err());
    }

    #[test]
    fn rejects_null_operator() {
        assert!(VaultConfig::new(acct(1), AccountId::zero()).is_err());
    }

    #[test]
    fn rejects_coinciding_accounts() {
        let Err(e) = VaultConfig::new(acct(1), acct(1)) else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            VaultError::InvalidConfiguration(
                "vault custody account and operator must be distinct"
            )
        );
    }
}
