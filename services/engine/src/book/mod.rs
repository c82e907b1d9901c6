//! Per-side priority queues
//!
//! Each side of the book keeps its resting orders in a binary heap keyed
//! by limit price, with arrival order breaking ties. The queues store
//! lightweight references; the orders themselves live in the book's order
//! store so settlement mutations are never shadowed by stale copies.

pub mod ask_queue;
pub mod bid_queue;

pub use ask_queue::AskQueue;
pub use bid_queue::BidQueue;
