//! Domain error taxonomy
//!
//! Errors raised while constructing or validating domain values, before
//! an order ever reaches the matching loop.

use thiserror::Error;

/// Errors from parsing or validating domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("unknown order side: {0}")]
    UnknownSide(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownSide("HOLD".to_string());
        assert_eq!(err.to_string(), "unknown order side: HOLD");
    }
}
