//! Bid (buy-side) priority queue
//!
//! Maintains buy orders with the highest-priced bid first, so the
//! crossing check always inspects the best bidder. Orders at the same
//! price are served in arrival order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use matchbook_types::ids::OrderId;
use matchbook_types::numeric::Price;

/// Bid (buy) side priority queue
///
/// O(log n) insert and extract-best, O(1) peek of the best price.
#[derive(Debug, Default)]
pub struct BidQueue {
    heap: BinaryHeap<BidEntry>,
    arrivals: u64,
}

/// Heap entry referencing a resting buy order
#[derive(Debug, Clone)]
struct BidEntry {
    price: Price,
    arrival: u64,
    order_id: OrderId,
}

impl Ord for BidEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: highest price wins; earlier arrival wins at equal price.
        self.price
            .cmp(&other.price)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

impl PartialOrd for BidEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BidEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BidEntry {}

impl BidQueue {
    /// Create a new empty bid queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resting buy order reference
    ///
    /// A reinserted order receives a fresh arrival number and therefore
    /// yields time priority at its price level.
    pub fn insert(&mut self, order_id: OrderId, price: Price) {
        let arrival = self.arrivals;
        self.arrivals += 1;
        self.heap.push(BidEntry {
            price,
            arrival,
            order_id,
        });
    }

    /// Extract the best (highest-priced) bid
    pub fn pop_best(&mut self) -> Option<OrderId> {
        self.heap.pop().map(|entry| entry.order_id)
    }

    /// Peek the best bid price without removing it
    pub fn peek_best_price(&self) -> Option<Price> {
        self.heap.peek().map(|entry| entry.price)
    }

    /// Number of resting bids
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
