//! Transaction settlement
//!
//! Reconciles a crossing pair into mutated order state, investor position
//! deltas, and a finalized transaction record. The matched quantity is
//! `min(selling.pending, buying.pending)` measured before any mutation,
//! and the transaction total always uses the buying order's limit price.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use matchbook_types::order::Order;
use matchbook_types::transaction::Transaction;

use crate::ledger::PositionLedger;

/// Reasons a settlement attempt is refused
///
/// A refused attempt leaves both orders and the ledger untouched; the
/// caller requeues the resting order unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementError {
    #[error("asset mismatch: selling {selling}, buying {buying}")]
    AssetMismatch { selling: String, buying: String },

    #[error("no pending shares on either side")]
    NoPendingShares,
}

/// Settle a matched pair into a finalized transaction
///
/// Decreases both orders' pending shares by the matched quantity, moves
/// that quantity between the two investors' positions in the selling
/// order's asset, overwrites the transaction's provisional share count,
/// and recomputes its total at the buying order's limit price. Orders
/// reaching zero pending shares transition to CLOSED.
pub fn settle(
    selling: &mut Order,
    buying: &mut Order,
    transaction: &mut Transaction,
    ledger: &mut dyn PositionLedger,
) -> Result<(), SettlementError> {
    if selling.asset_id != buying.asset_id {
        return Err(SettlementError::AssetMismatch {
            selling: selling.asset_id.to_string(),
            buying: buying.asset_id.to_string(),
        });
    }

    let matched = selling.pending_shares.min(buying.pending_shares);
    if matched == 0 {
        return Err(SettlementError::NoPendingShares);
    }

    // Position deltas are keyed by the selling order's asset; both orders
    // reference the same asset at this point.
    ledger.update_asset_position(selling.investor_id, &selling.asset_id, -(matched as i64));
    ledger.update_asset_position(buying.investor_id, &selling.asset_id, matched as i64);

    selling.fill(matched);
    buying.fill(matched);

    transaction.set_matched_shares(matched);
    transaction.calculate_total(matched, buying.limit_price);

    selling.record_transaction(transaction.transaction_id);
    buying.record_transaction(transaction.transaction_id);

    debug!(
        transaction_id = %transaction.transaction_id,
        shares = matched,
        total = %transaction.total,
        "settled transaction"
    );

    Ok(())
}
