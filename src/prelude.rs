//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use jit_vault::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, AssetId, BalanceDelta, PairSpec, Price, Rounding, Shares, Tick, TickRange,
};

// Re-export core components
pub use crate::orchestrator::{LiquidityOrchestrator, TradeCycle};
pub use crate::vault::ShareVault;

// Re-export external seams
pub use crate::traits::{AssetTransfer, TradeFacility};

// Re-export configuration
pub use crate::config::{OrchestratorConfig, VaultConfig};

// Re-export error types
pub use crate::error::{Result, VaultError};
