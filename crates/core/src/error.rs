//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, missing
/// items, stock exhaustion). None of these are transient faults: nothing in
/// the core retries, clamps, or swallows them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or out-of-range input field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure at the boundary).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No item exists with the given id.
    #[error("item not found: {item_id}")]
    NotFound { item_id: ItemId },

    /// A stock adjustment would drive the quantity below zero.
    ///
    /// Carries the attempted delta and the quantity that was available so the
    /// caller can react (e.g. offer the remaining units instead).
    #[error(
        "insufficient stock for item {item_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        item_id: ItemId,
        requested: i64,
        available: u64,
    },

    /// Infrastructure fault (e.g. a poisoned lock). Never a domain outcome.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(item_id: ItemId) -> Self {
        Self::NotFound { item_id }
    }

    pub fn insufficient_stock(item_id: ItemId, requested: i64, available: u64) -> Self {
        Self::InsufficientStock {
            item_id,
            requested,
            available,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
