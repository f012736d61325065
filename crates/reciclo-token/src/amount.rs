//! Token amount representation.
//!
//! Amounts are stored as raw base units internally, with a decimal-scaling
//! factor applied once at ledger construction (e.g. a supply of 1000 whole
//! tokens at 18 decimals is 1000 * 10^18 base units). `u128` storage keeps
//! the reference deployment's figures representable and lets weight * price
//! products be computed without overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount of tokens, in raw base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    raw: u128,
}

impl Amount {
    /// Zero tokens.
    pub const ZERO: Self = Self { raw: 0 };

    /// Maximum amount (`u128::MAX` base units).
    pub const MAX: Self = Self { raw: u128::MAX };

    /// Create an amount from raw base units.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { raw }
    }

    /// Create an amount from a whole-token count, scaled by `10^decimals`.
    ///
    /// Saturates at `u128::MAX` for scales no real deployment reaches.
    #[must_use]
    pub fn whole(count: u64, decimals: u8) -> Self {
        let scale = 10u128.saturating_pow(u32::from(decimals));
        Self {
            raw: u128::from(count).saturating_mul(scale),
        }
    }

    /// Get the amount in raw base units.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.raw
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.raw.checked_add(other.raw) {
            Some(raw) => Some(Self { raw }),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.raw.checked_sub(other.raw) {
            Some(raw) => Some(Self { raw }),
            None => None,
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            raw: self.raw.saturating_add(other.raw),
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self {
            raw: self.raw.saturating_sub(other.raw),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            raw: self.raw + other.raw,
        }
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            raw: self.raw - other.raw,
        }
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u64> for Amount {
    fn from(raw: u64) -> Self {
        Self::from_raw(u128::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_whole_scales_by_decimals() {
        let amount = Amount::whole(1000, 18);
        assert_eq!(amount.raw(), 1000 * 10u128.pow(18));
    }

    #[test_case(0, 18, 0; "zero tokens")]
    #[test_case(1, 0, 1; "no scaling")]
    #[test_case(80, 18, 80_000_000_000_000_000_000; "eighty at eighteen decimals")]
    fn test_whole(count: u64, decimals: u8, raw: u128) {
        assert_eq!(Amount::whole(count, decimals).raw(), raw);
    }

    #[test]
    fn test_zero() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ZERO.raw(), 0);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn test_checked_add() {
        let a = Amount::from_raw(1);
        assert_eq!(a.checked_add(Amount::from_raw(2)), Some(Amount::from_raw(3)));
        assert_eq!(Amount::MAX.checked_add(a), None);
    }

    #[test]
    fn test_checked_sub() {
        let a = Amount::from_raw(3);
        assert_eq!(a.checked_sub(Amount::from_raw(1)), Some(Amount::from_raw(2)));
        assert_eq!(Amount::from_raw(1).checked_sub(a), None);
    }

    #[test]
    fn test_saturating_add() {
        let c = Amount::MAX.saturating_add(Amount::from_raw(1));
        assert_eq!(c, Amount::MAX);
    }

    #[test]
    fn test_saturating_sub() {
        let c = Amount::from_raw(1).saturating_sub(Amount::from_raw(2));
        assert!(c.is_zero());
    }

    #[test]
    fn test_ordering() {
        let a = Amount::from_raw(1);
        let b = Amount::from_raw(2);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_display_is_raw_units() {
        let amount = Amount::from_raw(1500);
        assert_eq!(format!("{amount}"), "1500");
    }

    #[test]
    fn test_serialization() {
        let amount = Amount::whole(42, 18);
        let json = serde_json::to_string(&amount).expect("serialize");
        let parsed: Amount = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(amount, parsed);
    }
}
