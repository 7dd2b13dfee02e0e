//! Raw asset amount with checked arithmetic.

use core::fmt;

use super::Rounding;

/// A raw asset amount in the smallest unit of its asset.
///
/// `Amount` is the unit the transfer primitive moves and the vault holds in
/// reserve. It is deliberately distinct from [`Shares`](super::Shares): an
/// amount measures custody, shares measure proportional ownership, and the
/// two are only ever related through [`Amount::checked_mul_div`].
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking or wrapping.
///
/// # Examples
///
/// ```
/// use jit_vault::domain::{Amount, Rounding};
///
/// let deposit = Amount::new(4_000);
/// // Minting against total shares 3_000 over reserve 6_000:
/// let minted = deposit.checked_mul_div(3_000, 6_000, Rounding::Down);
/// assert_eq!(minted, Some(Amount::new(2_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `self · numerator / denominator` with an explicit rounding
    /// direction.
    ///
    /// This is the single funnel through which the share ledger's ratio
    /// rules flow, so the rounding direction is visible at every call site.
    ///
    /// Returns `None` if `denominator` is zero or the intermediate product
    /// overflows `u128` — never a silently wrapped value.
    #[must_use]
    pub const fn checked_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let product = match self.0.checked_mul(numerator) {
            Some(p) => p,
            None => return None,
        };
        match rounding {
            Rounding::Down => Some(Self(product / denominator)),
            Rounding::Up => {
                // Ceiling division: (p + d - 1) / d, with a remainder
                // fallback when the adjustment itself would overflow.
                match product.checked_add(denominator - 1) {
                    Some(adjusted) => Some(Self(adjusted / denominator)),
                    None => {
                        let q = product / denominator;
                        let r = product % denominator;
                        if r != 0 {
                            // q + 1 cannot overflow: r != 0 implies q < u128::MAX.
                            Some(Self(q + 1))
                        } else {
                            Some(Self(q))
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction & accessors -------------------------------------------

    #[test]
    fn new_and_get() {
        let a = Amount::new(42);
        assert_eq!(a.get(), 42);
    }

    #[test]
    fn constants() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Amount::new(1_000_000)), "1000000");
    }

    #[test]
    fn ordering() {
        assert!(Amount::new(1) < Amount::new(2));
        assert_eq!(Amount::new(5), Amount::new(5));
    }

    // -- checked_add / checked_sub ------------------------------------------

    #[test]
    fn add_normal() {
        let a = Amount::new(100);
        let b = Amount::new(200);
        assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
    }

    #[test]
    fn add_overflow() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_normal() {
        let a = Amount::new(300);
        assert_eq!(a.checked_sub(&Amount::new(100)), Some(Amount::new(200)));
    }

    #[test]
    fn sub_underflow() {
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
    }

    #[test]
    fn sub_to_zero() {
        let a = Amount::new(42);
        assert_eq!(a.checked_sub(&a), Some(Amount::ZERO));
    }

    // -- checked_mul_div ----------------------------------------------------

    #[test]
    fn mul_div_exact() {
        let a = Amount::new(100);
        assert_eq!(
            a.checked_mul_div(3, 10, Rounding::Down),
            Some(Amount::new(30))
        );
        assert_eq!(a.checked_mul_div(3, 10, Rounding::Up), Some(Amount::new(30)));
    }

    #[test]
    fn mul_div_remainder_down() {
        // 10 * 1 / 3 = 3.33… → 3
        let a = Amount::new(10);
        assert_eq!(a.checked_mul_div(1, 3, Rounding::Down), Some(Amount::new(3)));
    }

    #[test]
    fn mul_div_remainder_up() {
        // 10 * 1 / 3 = 3.33… → 4
        let a = Amount::new(10);
        assert_eq!(a.checked_mul_div(1, 3, Rounding::Up), Some(Amount::new(4)));
    }

    #[test]
    fn mul_div_by_zero_denominator() {
        let a = Amount::new(10);
        assert_eq!(a.checked_mul_div(1, 0, Rounding::Down), None);
        assert_eq!(a.checked_mul_div(1, 0, Rounding::Up), None);
    }

    #[test]
    fn mul_div_zero_value() {
        assert_eq!(
            Amount::ZERO.checked_mul_div(7, 3, Rounding::Up),
            Some(Amount::ZERO)
        );
    }

    #[test]
    fn mul_div_product_overflow() {
        assert_eq!(Amount::MAX.checked_mul_div(2, 1, Rounding::Down), None);
    }

    #[test]
    fn mul_div_identity() {
        let a = Amount::new(999);
        assert_eq!(a.checked_mul_div(1, 1, Rounding::Down), Some(a));
    }

    #[test]
    fn mul_div_ceiling_overflow_fallback() {
        // product = MAX, denominator = 2: the (p + d - 1) adjustment
        // overflows and the remainder fallback must kick in.
        let a = Amount::MAX;
        let floor = a.checked_mul_div(1, 2, Rounding::Down);
        let ceil = a.checked_mul_div(1, 2, Rounding::Up);
        let expected_floor = u128::MAX / 2;
        assert_eq!(floor, Some(Amount::new(expected_floor)));
        assert_eq!(ceil, Some(Amount::new(expected_floor + 1)));
    }

    #[test]
    fn mul_div_floor_never_exceeds_ceil() {
        let a = Amount::new(12_345);
        let Some(down) = a.checked_mul_div(789, 1_000, Rounding::Down) else {
            panic!("expected Some");
        };
        let Some(up) = a.checked_mul_div(789, 1_000, Rounding::Up) else {
            panic!("expected Some");
        };
        assert!(down <= up);
    }

    // -- Copy semantics -----------------------------------------------------

    #[test]
    fn copy_semantics() {
        let a = Amount::new(99);
        let b = a;
        assert_eq!(a, b);
    }
}
