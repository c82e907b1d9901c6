//! Domain types for the matchbook trading engine
//!
//! Shared type definitions used by the matching engine and the services
//! around it, ensuring type safety and deterministic arithmetic.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TransactionId, InvestorId, AssetId)
//! - `numeric`: Decimal price newtype
//! - `order`: Order lifecycle types
//! - `transaction`: Transaction (match) records
//! - `errors`: Domain error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod transaction;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::transaction::*;
}
