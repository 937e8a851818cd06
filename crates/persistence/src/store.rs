// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The case repository used by the server: optional remote create plus a
//! local JSON cache of every case.

use crate::error::PersistenceError;
use crate::remote::RemoteCaseService;
use crate::repository::{CaseListEntry, CaseRepository};
use intake_domain::{CaseId, CaseRecord};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Cases kept as a JSON array, in memory and optionally mirrored to a file.
///
/// New cases are posted to the remote service when one is configured; the
/// id it returns is used, falling back to a millisecond timestamp when it is
/// missing or already cached. Listing, updating and deleting only touch the
/// local cache. A change is visible only once the mirror file is written.
#[derive(Debug)]
pub struct CaseStore {
    remote: Option<RemoteCaseService>,
    cache_file: Option<PathBuf>,
    entries: Mutex<Vec<CaseListEntry>>,
}

impl CaseStore {
    /// Creates an empty store that keeps everything in memory.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self {
            remote: None,
            cache_file: None,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Opens a store mirrored to `path`, loading any cases already there.
    ///
    /// A missing file is treated as an empty cache and created on the first
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON array of cases.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let entries: Vec<CaseListEntry> = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), cases = entries.len(), "Loaded case cache");
        Ok(Self {
            remote: None,
            cache_file: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Posts new cases to `remote` before caching them.
    #[must_use]
    pub fn with_remote(mut self, remote: RemoteCaseService) -> Self {
        self.remote = Some(remote);
        self
    }

    async fn write_cache(&self, entries: &[CaseListEntry]) -> Result<(), PersistenceError> {
        let Some(path) = &self.cache_file else {
            return Ok(());
        };
        let json: String = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(path, json).await.map_err(|err| {
            error!(path = %path.display(), error = %err, "Failed to write case cache");
            PersistenceError::from(err)
        })
    }
}

/// The current time in milliseconds, bumped past every id in use.
fn fallback_id(entries: &[CaseListEntry]) -> CaseId {
    let now_ms: i64 =
        i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000)
            .unwrap_or(i64::MAX);
    let highest: i64 = entries.iter().map(|entry| entry.id.value()).max().unwrap_or(0);
    CaseId::new(now_ms.max(highest.saturating_add(1)))
}

/// The id a new case is stored under: the remote one unless it is missing
/// or already cached.
pub fn assign_id(assigned: Option<CaseId>, entries: &[CaseListEntry]) -> CaseId {
    match assigned {
        Some(id) if position(entries, id).is_err() => id,
        Some(id) => {
            let fallback: CaseId = fallback_id(entries);
            warn!(case_id = %id, fallback = %fallback, "Case service reused a cached id");
            fallback
        }
        None => fallback_id(entries),
    }
}

fn position(entries: &[CaseListEntry], id: CaseId) -> Result<usize, PersistenceError> {
    entries
        .iter()
        .position(|entry| entry.id == id)
        .ok_or(PersistenceError::CaseNotFound(id))
}

impl CaseRepository for CaseStore {
    async fn create(&self, record: &CaseRecord) -> Result<CaseId, PersistenceError> {
        let assigned: Option<CaseId> = match &self.remote {
            Some(remote) => remote.submit(record).await.inspect_err(|err| {
                error!(error = %err, "Case service rejected new case");
            })?,
            None => None,
        };

        let mut entries = self.entries.lock().await;
        let id: CaseId = assign_id(assigned, &entries);

        let mut next: Vec<CaseListEntry> = entries.clone();
        next.push(CaseListEntry::new(id, record.clone()));
        self.write_cache(&next).await?;
        *entries = next;
        info!(case_id = %id, "Created case");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<CaseListEntry>, PersistenceError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn get(&self, id: CaseId) -> Result<CaseListEntry, PersistenceError> {
        let entries = self.entries.lock().await;
        let index: usize = position(&entries, id)?;
        Ok(entries[index].clone())
    }

    async fn update(&self, id: CaseId, record: &CaseRecord) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().await;
        let index: usize = position(&entries, id)?;
        let mut next: Vec<CaseListEntry> = entries.clone();
        next[index].record = record.clone();
        self.write_cache(&next).await?;
        *entries = next;
        info!(case_id = %id, "Updated case");
        Ok(())
    }

    async fn delete(&self, id: CaseId) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().await;
        let index: usize = position(&entries, id)?;
        let mut next: Vec<CaseListEntry> = entries.clone();
        next.remove(index);
        self.write_cache(&next).await?;
        *entries = next;
        debug!(case_id = %id, remaining = entries.len(), "Deleted case");
        Ok(())
    }
}
