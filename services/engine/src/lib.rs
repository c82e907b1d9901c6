//! Matchbook matching engine
//!
//! Continuous double-auction engine: consumes a stream of buy/sell limit
//! orders, matches crossing orders by price priority, settles each match
//! into a transaction record, and emits the participating orders
//! downstream.
//!
//! **Key invariants:**
//! - Strict price priority on both sides (highest bid, lowest ask first)
//! - Exact share conservation across partial fills
//! - Orders close exactly when pending shares reach zero, irreversibly
//! - Transactions are created and emitted in arrival order of their
//!   triggering orders
//!
//! A single loop owns the book and all queue state; no locks are needed
//! as long as one engine instance runs per book.

pub mod book;
pub mod completion;
pub mod config;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod matching;

pub use completion::CompletionHandle;
pub use engine::Book;
pub use events::{RejectReason, SubmitOutcome};
pub use ledger::{InMemoryPositions, PositionLedger};
pub use matching::SettlementError;
