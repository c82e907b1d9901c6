//! Ask (sell-side) priority queue
//!
//! Maintains sell orders with the lowest-priced offer first (best ask).
//! Orders at the same price are served in arrival order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use matchbook_types::ids::OrderId;
use matchbook_types::numeric::Price;

/// Ask (sell) side priority queue
///
/// O(log n) insert and extract-best, O(1) peek of the best price.
#[derive(Debug, Default)]
pub struct AskQueue {
    heap: BinaryHeap<AskEntry>,
    arrivals: u64,
}

/// Heap entry referencing a resting sell order
#[derive(Debug, Clone)]
struct AskEntry {
    price: Price,
    arrival: u64,
    order_id: OrderId,
}

impl Ord for AskEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min by price on a max-heap: reverse the price comparison;
        // earlier arrival wins at equal price.
        other
            .price
            .cmp(&self.price)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

impl PartialOrd for AskEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AskEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AskEntry {}

impl AskQueue {
    /// Create a new empty ask queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resting sell order reference
    ///
    /// A reinserted order receives a fresh arrival number and therefore
    /// yields time priority at its price level.
    pub fn insert(&mut self, order_id: OrderId, price: Price) {
        let arrival = self.arrivals;
        self.arrivals += 1;
        self.heap.push(AskEntry {
            price,
            arrival,
            order_id,
        });
    }

    /// Extract the best (lowest-priced) ask
    pub fn pop_best(&mut self) -> Option<OrderId> {
        self.heap.pop().map(|entry| entry.order_id)
    }

    /// Peek the best ask price without removing it
    pub fn peek_best_price(&self) -> Option<Price> {
        self.heap.peek().map(|entry| entry.price)
    }

    /// Number of resting asks
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
