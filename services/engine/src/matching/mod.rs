//! Crossing detection and settlement
//!
//! `crossing` decides whether an incoming order can trade against a
//! resting price; `settlement` reconciles a matched pair into mutated
//! order state and a finalized transaction.

pub mod crossing;
pub mod settlement;

pub use settlement::SettlementError;
