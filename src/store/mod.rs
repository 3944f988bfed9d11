// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Store Abstraction
//!
//! Persistence collaborators for reservations, the admin session flag, and
//! the sent-email log. Reservations are append-only apart from status
//! patches; nothing is ever deleted.
//!
//! # Optimistic check-and-insert
//!
//! Every write bumps the store version. [`ReservationStore::append`] takes
//! the version of the snapshot the caller validated against and fails with
//! [`ReservationError::ConcurrencyConflict`] if anything was written since,
//! so validation and insertion behave as one step.
//!
//! ```text
//! snapshot() → validate(snapshot.reservations) → append(r, Some(snapshot.version))
//!                                                   ↓ conflict
//!                                               re-snapshot and retry
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Reservation, ReservationId, ReservationPatch};
use crate::errors::{ReservationError, ReservationResult};
use crate::notification::SentEmail;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// Reservations as of a store version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub reservations: Vec<Reservation>,
    pub version: u64,
}

/// Reservation persistence
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// All reservations in insertion order
    async fn list(&self) -> ReservationResult<Vec<Reservation>>;

    /// All reservations together with the current version
    async fn snapshot(&self) -> ReservationResult<StoreSnapshot>;

    /// Append a reservation
    ///
    /// With `Some(expected)`, fails with `ConcurrencyConflict` unless the
    /// store is still at that version. Returns the new version.
    async fn append(
        &self,
        reservation: Reservation,
        expected_version: Option<u64>,
    ) -> ReservationResult<u64>;

    /// Apply a partial update and return the updated reservation
    ///
    /// A patch carrying `expected_status` fails with `StatusChanged` and
    /// writes nothing if the reservation has moved on.
    async fn patch(
        &self,
        id: ReservationId,
        patch: ReservationPatch,
    ) -> ReservationResult<Reservation>;

    /// Look up one reservation
    async fn get(&self, id: ReservationId) -> ReservationResult<Option<Reservation>> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }
}

/// Admin-logged-in flag
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set_admin_session(&self, logged_in: bool) -> ReservationResult<()>;

    async fn is_admin_logged_in(&self) -> ReservationResult<bool>;

    async fn clear_admin_session(&self) -> ReservationResult<()> {
        self.set_admin_session(false).await
    }
}

/// Log of emails the transport reported as sent
#[async_trait]
pub trait EmailLog: Send + Sync {
    async fn record(&self, email: SentEmail) -> ReservationResult<()>;

    /// Sent emails, oldest first
    async fn sent_emails(&self) -> ReservationResult<Vec<SentEmail>>;
}

/// Everything a store holds, in its persisted shape
///
/// Shared by the in-memory and file-backed stores so both enforce the same
/// versioning rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(rename = "cibertec_reservations", default)]
    pub reservations: Vec<Reservation>,

    #[serde(rename = "cibertec_admin_session", default)]
    pub admin_session: bool,

    #[serde(rename = "cibertec_emails", default)]
    pub emails: Vec<SentEmail>,

    #[serde(default)]
    pub version: u64,
}

impl StoreDocument {
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            reservations: self.reservations.clone(),
            version: self.version,
        }
    }

    pub fn append(
        &mut self,
        reservation: Reservation,
        expected_version: Option<u64>,
    ) -> ReservationResult<u64> {
        if let Some(expected) = expected_version {
            if expected != self.version {
                return Err(ReservationError::ConcurrencyConflict {
                    expected,
                    actual: self.version,
                });
            }
        }
        if self.reservations.iter().any(|r| r.id == reservation.id) {
            return Err(ReservationError::Store(format!(
                "reservation {} already exists",
                reservation.id
            )));
        }

        self.reservations.push(reservation);
        self.version += 1;
        Ok(self.version)
    }

    pub fn patch(
        &mut self,
        id: ReservationId,
        patch: &ReservationPatch,
    ) -> ReservationResult<Reservation> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReservationError::NotFound(id))?;

        if let Some(expected) = patch.expected_status {
            if reservation.status != expected {
                return Err(ReservationError::StatusChanged {
                    id,
                    expected,
                    actual: reservation.status,
                });
            }
        }

        patch.apply_to(reservation);
        let updated = reservation.clone();
        self.version += 1;
        Ok(updated)
    }
}
