// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for reservation infrastructure operations

use thiserror::Error;

use crate::domain::{ReservationId, ReservationStatus};

/// Errors that can occur in store, transport, and configuration operations
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Storage backend error
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reservation does not exist
    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    /// Store was written to since the snapshot the caller validated against
    #[error("Concurrency conflict: expected version {expected}, got {actual}")]
    ConcurrencyConflict { expected: u64, actual: u64 },

    /// Email transport failed to deliver
    #[error("Email transport error: {0}")]
    Transport(String),

    /// Reservation left the status a guarded patch expected
    #[error("Reservation {id} is {actual}, expected {expected}")]
    StatusChanged {
        id: ReservationId,
        expected: ReservationStatus,
        actual: ReservationStatus,
    },
}

/// Result type for reservation infrastructure operations
pub type ReservationResult<T> = Result<T, ReservationError>;

impl From<serde_json::Error> for ReservationError {
    fn from(err: serde_json::Error) -> Self {
        ReservationError::Serialization(err.to_string())
    }
}
