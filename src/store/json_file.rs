// Copyright (c) 2025 - Cowboy AI, Inc.
//! JSON file store
//!
//! Persists the whole [`StoreDocument`] as one JSON file. Every operation
//! loads the file, applies the change, and writes it back while holding an
//! advisory lock on a sibling `<file>.lock`, so separate handles and
//! separate CLI invocations see each other's writes. Each write goes to its
//! own temporary file in the same directory and is persisted over the store
//! file in one rename.
//!
//! File I/O and lock waits run on tokio's blocking pool.

use async_trait::async_trait;
use fd_lock::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{EmailLog, ReservationStore, SessionStore, StoreDocument, StoreSnapshot};
use crate::domain::{Reservation, ReservationId, ReservationPatch};
use crate::errors::{ReservationError, ReservationResult};
use crate::notification::SentEmail;

/// File-backed store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    /// Use `path` as the backing file; it is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        Self {
            path,
            lock_path: lock_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<T, F>(&self, f: F) -> ReservationResult<T>
    where
        F: FnOnce(&StoreDocument) -> T + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        blocking(move || {
            let file = match open_lock_file(&lock_path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "store directory missing, starting empty");
                    return Ok(f(&StoreDocument::default()));
                }
                Err(e) => return Err(e.into()),
            };
            let lock = RwLock::new(file);
            let _guard = lock.read()?;
            let document = load(&path)?;
            Ok(f(&document))
        })
        .await
    }

    async fn update<T, F>(&self, f: F) -> ReservationResult<T>
    where
        F: FnOnce(&mut StoreDocument) -> ReservationResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        blocking(move || {
            if let Some(parent) = parent_dir(&path) {
                fs::create_dir_all(parent)?;
            }
            let mut lock = RwLock::new(open_lock_file(&lock_path)?);
            let _guard = lock.write()?;
            let mut document = load(&path)?;
            let value = f(&mut document)?;
            save(&path, &document)?;
            Ok(value)
        })
        .await
    }
}

async fn blocking<T, F>(task: F) -> ReservationResult<T>
where
    F: FnOnce() -> ReservationResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ReservationError::Store(format!("store task failed: {e}")))?
}

fn open_lock_file(lock_path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Caller holds the store lock
fn load(path: &Path) -> ReservationResult<StoreDocument> {
    match fs::read(path) {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StoreDocument::default()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing, starting empty");
            Ok(StoreDocument::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Caller holds the store lock exclusively
fn save(path: &Path, document: &StoreDocument) -> ReservationResult<()> {
    let bytes = serde_json::to_vec_pretty(document)?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path).unwrap_or(Path::new(".")))?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to replace store file");
        io::Error::from(e)
    })?;
    Ok(())
}

#[async_trait]
impl ReservationStore for JsonFileStore {
    async fn list(&self) -> ReservationResult<Vec<Reservation>> {
        self.read(|doc| doc.reservations.clone()).await
    }

    async fn snapshot(&self) -> ReservationResult<StoreSnapshot> {
        self.read(StoreDocument::snapshot).await
    }

    async fn append(
        &self,
        reservation: Reservation,
        expected_version: Option<u64>,
    ) -> ReservationResult<u64> {
        self.update(move |doc| doc.append(reservation, expected_version))
            .await
    }

    async fn patch(
        &self,
        id: ReservationId,
        patch: ReservationPatch,
    ) -> ReservationResult<Reservation> {
        self.update(move |doc| doc.patch(id, &patch)).await
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn set_admin_session(&self, logged_in: bool) -> ReservationResult<()> {
        self.update(move |doc| {
            doc.admin_session = logged_in;
            Ok(())
        })
        .await
    }

    async fn is_admin_logged_in(&self) -> ReservationResult<bool> {
        self.read(|doc| doc.admin_session).await
    }
}

#[async_trait]
impl EmailLog for JsonFileStore {
    async fn record(&self, email: SentEmail) -> ReservationResult<()> {
        self.update(move |doc| {
            doc.emails.push(email);
            Ok(())
        })
        .await
    }

    async fn sent_emails(&self) -> ReservationResult<Vec<SentEmail>> {
        self.read(|doc| doc.emails.clone()).await
    }
}
