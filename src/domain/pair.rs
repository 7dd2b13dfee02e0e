//! Specification of a tracked asset pair.

use super::AssetId;
use crate::error::VaultError;

/// The two assets a trade cycle concerns, plus the pair's trading grid.
///
/// Assets are canonically sorted so that `first() < second()`, preventing
/// duplicate specifications such as `(A, B)` and `(B, A)`. `tick_spacing`
/// is the facility's minimum price granularity for the pair, used to derive
/// the default ephemeral range.
///
/// # Examples
///
/// ```
/// use jit_vault::domain::{AssetId, PairSpec};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// // Order is enforced automatically:
/// let pair = PairSpec::new(b, a, 60).expect("distinct assets");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.second(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairSpec {
    asset_a: AssetId,
    asset_b: AssetId,
    tick_spacing: u16,
}

impl PairSpec {
    /// Creates a new canonically-ordered `PairSpec`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidArgument`] if the assets are equal or either
    ///   is the null sentinel.
    /// - [`VaultError::InvalidConfiguration`] if `tick_spacing` is zero.
    pub fn new(asset1: AssetId, asset2: AssetId, tick_spacing: u16) -> crate::error::Result<Self> {
        if asset1.is_zero() || asset2.is_zero() {
            return Err(VaultError::InvalidArgument(
                "pair assets must be non-null",
            ));
        }
        if asset1 == asset2 {
            return Err(VaultError::InvalidArgument(
                "pair requires two distinct assets",
            ));
        }
        if tick_spacing == 0 {
            return Err(VaultError::InvalidConfiguration(
                "tick spacing must be greater than zero",
            ));
        }

        let (asset_a, asset_b) = if asset1 < asset2 {
            (asset1, asset2)
        } else {
            (asset2, asset1)
        };

        Ok(Self {
            asset_a,
            asset_b,
            tick_spacing,
        })
    }

    /// Returns the first asset (lower identifier).
    #[must_use]
    pub const fn first(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the second asset (higher identifier).
    #[must_use]
    pub const fn second(&self) -> AssetId {
        self.asset_b
    }

    /// Returns the pair's minimum price granularity in ticks.
    #[must_use]
    pub const fn tick_spacing(&self) -> u16 {
        self.tick_spacing
    }

    /// Returns `true` if the given asset is part of this pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidArgument`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> crate::error::Result<AssetId> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(VaultError::InvalidArgument("asset is not part of this pair"))
        }
    }

    /// Returns the canonical `(first, second)` key identifying this pair,
    /// independent of tick spacing.
    #[must_use]
    pub const fn key(&self) -> (AssetId, AssetId) {
        (self.asset_a, self.asset_b)
    }
}
