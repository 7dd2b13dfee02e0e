//! Unified error types for the JIT vault library.
//!
//! All fallible operations across the crate return [`VaultError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Every error aborts its entire enclosing unit of work: no operation in
//! this crate commits partially, and no operation retries internally —
//! retries are a caller concern.

use thiserror::Error;

/// Convenience alias for `Result<T, VaultError>` used throughout the crate.
pub type Result<T> = core::result::Result<T, VaultError>;

/// Unified error enum for all vault and orchestrator operations.
///
/// Variants carry a static context message describing which precondition
/// was violated, so call sites stay comparable in tests without allocating.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VaultError {
    /// An argument failed basic validation (zero amount, null identifier).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A withdrawal asked for more shares than the account holds.
    #[error("insufficient shares for withdrawal")]
    InsufficientShares,

    /// A liquidity removal asked for more than the holder contributed.
    #[error("insufficient contribution for removal")]
    InsufficientContribution,

    /// A withdrawal was attempted against an asset with no reserve.
    #[error("vault reserve is empty")]
    EmptyVault,

    /// Both legs of a liquidity addition were zero.
    #[error("no deposit: both amounts are zero")]
    NoDeposit,

    /// The trade facility has no price for the requested pair.
    #[error("pair is not initialized in the trade facility")]
    UninitializedPair,

    /// The asset-transfer primitive rejected a movement.
    #[error("asset transfer failed: {0}")]
    TransferFailure(&'static str),

    /// A nested entry into an operation already in progress was rejected.
    #[error("re-entrant operation rejected")]
    ReentrancyRejected,

    /// The caller does not hold the designated operator role.
    #[error("caller is not the designated operator")]
    UnauthorizedCaller,

    /// Arithmetic overflow during a calculation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero during a calculation.
    #[error("division by zero")]
    DivisionByZero,

    /// A tick index is outside the valid range or misaligned.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A tick range is empty or inverted.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// A price value is negative, NaN, or infinite.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A configuration parameter is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
