//! Submission outcomes
//!
//! Every order handed to the book yields an explicit outcome; no input is
//! silently dropped. Rejections cover orders that never reach a queue,
//! match failures cover crossing attempts the settlement step refused.

use serde::{Deserialize, Serialize};

use matchbook_types::order::Order;
use matchbook_types::transaction::Transaction;

use crate::matching::SettlementError;

/// Why an inbound order was rejected before queuing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Order carries no shares to match
    NoShares,
}

/// Outcome of processing one inbound order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// No crossable counterparty; the order rests in its side's queue
    Rested,
    /// Settled against a resting order
    ///
    /// `maker` and `taker` are the post-settlement states of the two
    /// participants, in the order they are emitted downstream.
    Matched {
        transaction: Transaction,
        maker: Order,
        taker: Order,
    },
    /// Failed validation; the order was not queued
    Rejected(RejectReason),
    /// A crossing candidate was found but settlement refused the pair;
    /// the resting order was requeued unchanged and the incoming order
    /// rests in its own queue
    MatchFailed(SettlementError),
}
