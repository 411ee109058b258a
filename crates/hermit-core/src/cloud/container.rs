//! File-per-note storage in a platform-synchronized container.
//!
//! The container is a directory the platform mirrors across devices
//! (iCloud-style). It holds one `<id>.json` object per note and nothing
//! else the sync engine cares about. Availability can change between any
//! two calls - the user may disable cloud storage, connectivity may drop,
//! quota may run out - so it is probed before every operation, never
//! cached.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Note, NoteId};

const PROBE_PREFIX: &str = ".probe-";

/// Note storage operations shared across remote backends.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Check that the remote location exists (creating it if absent) and is
    /// writable, via a disposable write/delete probe.
    ///
    /// Never errors; any failure degrades to `false`.
    async fn is_available(&self) -> bool;

    /// Serialize and store a note keyed by its id, overwriting any prior
    /// version unconditionally. The storage layer is not versioned;
    /// conflict resolution happens in the engine.
    async fn write_note(&self, note: &Note) -> Result<()>;

    /// Read a note by id. `Ok(None)` when no object exists for that id,
    /// distinguishable from a read or parse failure.
    async fn read_note(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Remove a note object; absent objects are not an error.
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Enumerate ids of all note objects currently stored.
    async fn list_note_ids(&self) -> Result<Vec<NoteId>>;
}

/// Directory-backed remote store.
#[derive(Debug, Clone)]
pub struct CloudContainer {
    root: PathBuf,
}

impl CloudContainer {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Container directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_path(&self, id: &NoteId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    async fn probe_writable(&self) -> std::io::Result<()> {
        let probe = self.root.join(format!("{PROBE_PREFIX}{}", Uuid::now_v7()));
        tokio::fs::write(&probe, b"probe").await?;
        tokio::fs::remove_file(&probe).await
    }
}

#[async_trait]
impl RemoteStore for CloudContainer {
    async fn is_available(&self) -> bool {
        if let Err(error) = tokio::fs::create_dir_all(&self.root).await {
            tracing::debug!(root = %self.root.display(), %error, "container unavailable");
            return false;
        }
        match self.probe_writable().await {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(root = %self.root.display(), %error, "container not writable");
                false
            }
        }
    }

    async fn write_note(&self, note: &Note) -> Result<()> {
        let bytes = serde_json::to_vec(note)?;
        let path = self.note_path(&note.id);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|error| storage_error("write", &path, &error))
    }

    async fn read_note(&self, id: &NoteId) -> Result<Option<Note>> {
        let path = self.note_path(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(storage_error("read", &path, &error)),
        }
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let path = self.note_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(storage_error("delete", &path, &error)),
        }
    }

    async fn list_note_ids(&self) -> Result<Vec<NoteId>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|error| storage_error("list", &self.root, &error))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|error| storage_error("list", &self.root, &error))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // Anything that isn't named after a note id is not ours to sync.
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<NoteId>().ok())
            {
                ids.push(id);
            }
        }

        Ok(ids)
    }
}

fn storage_error(operation: &str, path: &Path, error: &impl std::fmt::Display) -> Error {
    Error::Storage(format!(
        "container {operation} failed for {}: {error}",
        path.display()
    ))
}
