//! The per-asset proportional-ownership ledger.

mod share_vault;

pub use share_vault::ShareVault;
