// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory store

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{EmailLog, ReservationStore, SessionStore, StoreDocument, StoreSnapshot};
use crate::domain::{Reservation, ReservationId, ReservationPatch};
use crate::errors::ReservationResult;
use crate::notification::SentEmail;

/// Process-local store; state is lost when dropped
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreDocument>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing reservations
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        Self {
            state: RwLock::new(StoreDocument {
                reservations,
                ..StoreDocument::default()
            }),
        }
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn list(&self) -> ReservationResult<Vec<Reservation>> {
        Ok(self.state.read().await.reservations.clone())
    }

    async fn snapshot(&self) -> ReservationResult<StoreSnapshot> {
        Ok(self.state.read().await.snapshot())
    }

    async fn append(
        &self,
        reservation: Reservation,
        expected_version: Option<u64>,
    ) -> ReservationResult<u64> {
        let id = reservation.id;
        let version = self.state.write().await.append(reservation, expected_version)?;
        debug!(%id, version, "appended reservation");
        Ok(version)
    }

    async fn patch(
        &self,
        id: ReservationId,
        patch: ReservationPatch,
    ) -> ReservationResult<Reservation> {
        self.state.write().await.patch(id, &patch)
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn set_admin_session(&self, logged_in: bool) -> ReservationResult<()> {
        self.state.write().await.admin_session = logged_in;
        Ok(())
    }

    async fn is_admin_logged_in(&self) -> ReservationResult<bool> {
        Ok(self.state.read().await.admin_session)
    }
}

#[async_trait]
impl EmailLog for InMemoryStore {
    async fn record(&self, email: SentEmail) -> ReservationResult<()> {
        self.state.write().await.emails.push(email);
        Ok(())
    }

    async fn sent_emails(&self) -> ReservationResult<Vec<SentEmail>> {
        Ok(self.state.read().await.emails.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReservationRequest, ReservationStatus, TimeSlot};
    use crate::errors::ReservationError;
    use chrono::{NaiveDate, Utc};

    fn reservation() -> Reservation {
        Reservation::from_request(
            ReservationRequest {
                student_name: "Diego".to_string(),
                student_last_name: "Huamán".to_string(),
                student_email: "diego@cibertec.edu.pe".to_string(),
                lab_room: "be-308".to_string(),
                date: NaiveDate::from_ymd_opt(2030, 3, 4).unwrap(),
                start_time: TimeSlot::new(14).unwrap(),
                duration: 2,
            },
            ReservationId::new(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_append_list_get() {
        let store = InMemoryStore::new();
        let r = reservation();

        store.append(r.clone(), None).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![r.clone()]);
        assert_eq!(store.get(r.id).await.unwrap(), Some(r));
        assert_eq!(store.get(ReservationId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_snapshot_guards_append() {
        let store = InMemoryStore::new();
        let snapshot = store.snapshot().await.unwrap();

        store.append(reservation(), Some(snapshot.version)).await.unwrap();
        let stale = store.append(reservation(), Some(snapshot.version)).await;

        assert!(matches!(
            stale,
            Err(ReservationError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_patch_status() {
        let store = InMemoryStore::with_reservations(vec![reservation()]);
        let id = store.list().await.unwrap()[0].id;

        let updated = store
            .patch(id, ReservationPatch::status(ReservationStatus::Rejected))
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Rejected);
        assert_eq!(store.snapshot().await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_admin_session_flag() {
        let store = InMemoryStore::new();
        assert!(!store.is_admin_logged_in().await.unwrap());

        store.set_admin_session(true).await.unwrap();
        assert!(store.is_admin_logged_in().await.unwrap());

        store.clear_admin_session().await.unwrap();
        assert!(!store.is_admin_logged_in().await.unwrap());
    }
}
