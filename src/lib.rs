//! # JIT Vault
//!
//! Just-in-time liquidity vault: a multi-asset proportional-ownership
//! ledger whose pooled capital is transiently withdrawn in full and
//! redeployed as a concentrated, short-lived position whenever a trade
//! against a tracked pair occurs, with any leftover balance plus trading
//! fees returned to the ledger once the trade completes.
//!
//! Two problems are solved here:
//!
//! 1. **Proportional-share mathematics** that hold under arbitrary
//!    interleavings of deposits and withdrawals without letting any party
//!    extract value through rounding — every division rounds in the
//!    vault's favor.
//! 2. **The JIT cycle**: the withdraw-all → size → open → trade → close →
//!    redeposit orchestration that executes atomically around an
//!    externally executed trade.
//!
//! Trade pricing/execution and asset custody stay outside the crate,
//! behind the [`traits::TradeFacility`] and [`traits::AssetTransfer`]
//! seams.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use jit_vault::config::{OrchestratorConfig, VaultConfig};
//! use jit_vault::domain::{AccountId, Amount, AssetId, PairSpec};
//! use jit_vault::orchestrator::LiquidityOrchestrator;
//!
//! // 1. Configure custody and operator accounts
//! let vault_cfg = VaultConfig::new(
//!     AccountId::from_bytes([1u8; 32]),   // vault custody account
//!     AccountId::from_bytes([2u8; 32]),   // operator = the orchestrator
//! )?;
//! let cfg = OrchestratorConfig::new(AccountId::from_bytes([2u8; 32]), vault_cfg)?;
//! let mut orchestrator = LiquidityOrchestrator::new(&cfg)?;
//!
//! // 2. Depositors add liquidity against a pair
//! let pair = PairSpec::new(usdc, weth, 60)?;
//! orchestrator.add_liquidity(depositor, &pair, Amount::new(4_000), Amount::new(2_000), &mut transfer)?;
//!
//! // 3. The trade facility brackets each trade with the JIT hooks
//! let cycle = orchestrator.before_trade(&pair, None, &mut transfer, &mut facility)?;
//! // … trade body executes inside the facility …
//! orchestrator.after_trade(cycle, &mut transfer, &mut facility)?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Depositors   │  add_liquidity / remove_liquidity
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   before_trade / after_trade   ┌───────────────┐
//! │ Orchestrator  │ ◄───────────────────────────── │ TradeFacility │
//! └──────┬───────┘                                └───────────────┘
//!        │ deposit / withdraw (operator-only)
//!        ▼
//! ┌──────────────┐   transfer / balance_of        ┌───────────────┐
//! │  ShareVault   │ ─────────────────────────────► │ AssetTransfer │
//! └──────────────┘                                └───────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`PairSpec`](domain::PairSpec), [`TickRange`](domain::TickRange), … |
//! | [`traits`] | External seams: [`AssetTransfer`](traits::AssetTransfer), [`TradeFacility`](traits::TradeFacility) |
//! | [`config`] | Validated construction blueprints: [`VaultConfig`](config::VaultConfig), [`OrchestratorConfig`](config::OrchestratorConfig) |
//! | [`vault`] | [`ShareVault`](vault::ShareVault), the proportional-share ledger |
//! | [`orchestrator`] | [`LiquidityOrchestrator`](orchestrator::LiquidityOrchestrator) and the [`TradeCycle`](orchestrator::TradeCycle) value |
//! | [`math`] | Share ratio rules, tick math, position sizing |
//! | [`error`] | [`VaultError`](error::VaultError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

// Module declarations
pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod orchestrator;
pub mod prelude;
pub mod traits;
pub mod vault;

#[cfg(test)]
mod proptest_properties;
