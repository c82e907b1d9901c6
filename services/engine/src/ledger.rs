//! Investor position interface
//!
//! The investor/account subsystem lives outside the engine; settlement
//! only needs to apply share deltas to investor holdings. Implementations
//! are invoked synchronously from the matching loop and must not block
//! indefinitely, since a slow ledger stalls the entire book.

use std::collections::BTreeMap;

use matchbook_types::ids::{AssetId, InvestorId};

/// Position-update interface consumed by settlement
pub trait PositionLedger {
    /// Apply a share delta to an investor's holding of an asset
    ///
    /// Negative deltas reduce the holding; a missing position is treated
    /// as zero and created on first update.
    fn update_asset_position(&mut self, investor: InvestorId, asset: &AssetId, delta: i64);
}

/// In-memory position ledger for tests and embedded use
///
/// BTreeMap keeps iteration deterministic.
#[derive(Debug, Default)]
pub struct InMemoryPositions {
    positions: BTreeMap<(InvestorId, AssetId), i64>,
}

impl InMemoryPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an investor's holding of an asset (0 if never touched)
    pub fn position(&self, investor: InvestorId, asset: &AssetId) -> i64 {
        self.positions
            .get(&(investor, asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of tracked positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if no positions are tracked
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionLedger for InMemoryPositions {
    fn update_asset_position(&mut self, investor: InvestorId, asset: &AssetId, delta: i64) {
        let entry = self
            .positions
            .entry((investor, asset.clone()))
            .or_insert(0);
        *entry += delta;
    }
}
