//! Unified error type for the domain layer.
//!
//! Every fallible domain operation reports one of these variants, so the
//! application layer can handle failures without resorting to String or
//! anyhow. All variants are recoverable at the boundary that triggered them.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An aggregate invariant would be violated (e.g. negative Ice strength)
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Operation requested from a state that does not support it
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A debit would drive credits below zero
    #[error("Insufficient credits: need {required}, have {available}")]
    InsufficientCredits { required: u32, available: u32 },

    /// Installing a program would exceed the character's memory capacity
    #[error("Memory exceeded: need {required} units, capacity {capacity}")]
    MemoryExceeded { required: u32, capacity: u32 },
}

impl DomainError {
    /// Create an invariant violation error.
    ///
    /// Use this when construction or mutation would break an aggregate
    /// invariant: out-of-range values, duplicate keys, empty required fields.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_error_display() {
        let err = DomainError::invariant("strength must be non-negative");
        assert!(matches!(err, DomainError::Invariant(_)));
        assert_eq!(
            err.to_string(),
            "Invariant violation: strength must be non-negative"
        );
    }

    #[test]
    fn not_found_error_display() {
        let err = DomainError::not_found("Contract", "123e4567-e89b-12d3-a456-426614174000");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Contract"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn insufficient_credits_display() {
        let err = DomainError::InsufficientCredits {
            required: 500,
            available: 120,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient credits: need 500, have 120"
        );
    }

    #[test]
    fn invalid_transition_display() {
        let err = DomainError::invalid_transition("run already ended");
        assert_eq!(err.to_string(), "Invalid transition: run already ended");
    }
}
