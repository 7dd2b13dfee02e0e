//! Configuration for the liquidity orchestrator.

use super::VaultConfig;
use crate::domain::AccountId;
use crate::error::VaultError;

/// Immutable construction parameters of a
/// [`LiquidityOrchestrator`](crate::orchestrator::LiquidityOrchestrator).
///
/// The orchestrator constructs and owns its vault, so its configuration
/// nests the [`VaultConfig`].
///
/// # Validation
///
/// - `account` (the orchestrator's own account in the transfer primitive)
///   must be non-null.
/// - `account` must be the vault's designated operator — the orchestrator
///   is the only caller of the vault's restricted surface.
/// - `account` must be distinct from the vault's custody account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    account: AccountId,
    vault: VaultConfig,
}

impl OrchestratorConfig {
    /// Creates a new `OrchestratorConfig`.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`VaultConfig::validate`].
    /// - [`VaultError::InvalidConfiguration`] if `account` is null, is not
    ///   the vault operator, or coincides with the vault custody account.
    pub fn new(account: AccountId, vault: VaultConfig) -> Result<Self, VaultError> {
        let config = Self { account, vault };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`OrchestratorConfig::new`].
    pub fn validate(&self) -> Result<(), VaultError> {
        self.vault.validate()?;
        if self.account.is_zero() {
            return Err(VaultError::InvalidConfiguration(
                "orchestrator account must be non-null",
            ));
        }
        if self.account != self.vault.operator() {
            return Err(VaultError::InvalidConfiguration(
                "orchestrator account must be the vault operator",
            ));
        }
        Ok(())
    }

    /// Returns the orchestrator's account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the nested vault configuration.
    #[must_use]
    pub const fn vault(&self) -> &VaultConfig {
        &self.vault
    }
}
