//! Transaction (match) records
//!
//! A transaction records one match between a selling order and a buying
//! order. It is created with a provisional share count and price taken
//! from the taker, and finalized once by settlement, which overwrites the
//! share count with the matched quantity and recomputes the total.

use crate::ids::{OrderId, TransactionId};
use crate::numeric::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The record of one match between two orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub selling_order_id: OrderId,
    pub buying_order_id: OrderId,
    /// Matched share count; provisional until settlement finalizes it
    pub shares: u64,
    /// Price the taker quoted, kept even after the total is recomputed
    pub execution_price: Price,
    /// Monetary total; always shares x the buying order's limit price
    /// after finalization
    pub total: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with the taker's shares and price
    pub fn new(
        selling_order_id: OrderId,
        buying_order_id: OrderId,
        shares: u64,
        execution_price: Price,
    ) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            selling_order_id,
            buying_order_id,
            shares,
            execution_price,
            total: execution_price.total_for(shares),
            executed_at: Utc::now(),
        }
    }

    /// Overwrite the provisional share count with the matched quantity
    pub fn set_matched_shares(&mut self, shares: u64) {
        self.shares = shares;
    }

    /// Recompute the total from a share count and a price
    ///
    /// Settlement calls this with the buying order's limit price; the
    /// buyer-price asymmetry is relied on by downstream accounting.
    pub fn calculate_total(&mut self, shares: u64, price: Price) {
        self.total = price.total_for(shares);
    }
}
