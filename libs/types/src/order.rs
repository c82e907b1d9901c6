//! Order lifecycle types
//!
//! An order is a resting or incoming request to trade a fixed number of
//! shares of one asset at a limit price. Pending shares only ever
//! decrease; an order transitions OPEN -> CLOSED exactly when its pending
//! count reaches zero, and never reopens.

use crate::errors::DomainError;
use crate::ids::{AssetId, InvestorId, OrderId, TransactionId};
use crate::numeric::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl TryFrom<&str> for Side {
    type Error = DomainError;

    /// Parse a wire-format side string
    ///
    /// Anything other than "BUY" or "SELL" is surfaced as an error so the
    /// ingestion boundary can reject the record instead of dropping it.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(DomainError::UnknownSide(other.to_string())),
        }
    }
}

/// Order status
///
/// The only transition is Open -> Closed, triggered when pending shares
/// reach exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Open,
    Closed,
}

/// A limit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub investor_id: InvestorId,
    pub asset_id: AssetId,
    pub side: Side,
    pub limit_price: Price,
    /// Requested share count, immutable over the order's lifetime
    pub original_shares: u64,
    /// Shares not yet matched; strictly decreasing
    pub pending_shares: u64,
    pub status: OrderStatus,
    /// Transactions this order participated in, in match order
    pub transactions: Vec<TransactionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new open order
    pub fn new(
        investor_id: InvestorId,
        asset_id: AssetId,
        side: Side,
        limit_price: Price,
        shares: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            order_id: OrderId::new(),
            investor_id,
            asset_id,
            side,
            limit_price,
            original_shares: shares,
            pending_shares: shares,
            status: OrderStatus::Open,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the share invariant: 0 <= pending <= original
    pub fn check_invariant(&self) -> bool {
        self.pending_shares <= self.original_shares
    }

    /// Check if the order is closed
    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }

    /// Shares already matched
    pub fn filled_shares(&self) -> u64 {
        self.original_shares - self.pending_shares
    }

    /// Decrease pending shares by a matched quantity
    ///
    /// Closes the order when pending shares reach exactly zero.
    ///
    /// # Panics
    /// Panics if the fill exceeds the pending share count
    pub fn fill(&mut self, shares: u64) {
        assert!(
            shares <= self.pending_shares,
            "fill exceeds pending shares"
        );

        self.pending_shares -= shares;
        if self.pending_shares == 0 {
            self.status = OrderStatus::Closed;
        }
        self.updated_at = Utc::now();
    }

    /// Record participation in a transaction
    pub fn record_transaction(&mut self, transaction_id: TransactionId) {
        self.transactions.push(transaction_id);
    }
}
