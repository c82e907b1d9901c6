//! Decimal price newtype
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point
//! errors). Prices are non-negative; share counts are plain `u64` so
//! quantity conservation is exact by construction.

use crate::errors::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limit price of an order
///
/// Total ordering over prices drives the priority queues, so `Price`
/// derives `Ord` from the inner `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal, rejecting negative values
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value.is_sign_negative() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Create a price from an integer number of currency units
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse a price from a decimal string
    pub fn from_str(s: &str) -> Result<Self, DomainError> {
        let value: Decimal = s
            .parse()
            .map_err(|_| DomainError::InvalidPrice(s.to_string()))?;
        Self::try_new(value).ok_or_else(|| DomainError::InvalidPrice(s.to_string()))
    }

    /// Get the inner decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Multiply by a share count, yielding a monetary total
    pub fn total_for(&self, shares: u64) -> Decimal {
        self.0 * Decimal::from(shares)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
