//! Durable key-value persistence for the note collection.
//!
//! The store owns three reserved documents: the canonical note collection,
//! the per-note sync-status map, and user settings. Every mutation is a
//! read-latest / compute / write-latest cycle under a single writer lock;
//! writes go through a temp file + rename so an interrupted write leaves
//! the previous document intact.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{Note, NoteId, Settings, SyncStatus};

const NOTES_KEY: &str = "notes";
const STATUS_KEY: &str = "noteSyncStatus";
const SETTINGS_KEY: &str = "settings";

/// Contract for the authoritative local note collection.
///
/// Callers must treat a failed `save_notes` as "state unknown - re-read
/// before retrying", never assume partial success.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read the full note collection
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Overwrite the full note collection in one batch
    async fn save_notes(&self, notes: &[Note]) -> Result<()>;

    /// Get a note by ID
    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Create and append a new note
    async fn create_note(&self, title: &str, content: &str) -> Result<Note>;

    /// Append a fully-formed note; rejects duplicate ids
    async fn insert_note(&self, note: Note) -> Result<()>;

    /// Update a note's title and content.
    ///
    /// Touches `updated_at` and resets the note's sync status, so an
    /// edited note always reads as not-synced without caller involvement.
    async fn update_note(&self, id: &NoteId, title: &str, content: &str) -> Result<Note>;

    /// Remove a note and its sync-status entry
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Sync status for a note; `NotSynced` when no entry exists
    async fn status(&self, id: &NoteId) -> Result<SyncStatus>;

    /// Record a note's sync status, overwriting any prior value
    async fn set_status(&self, id: &NoteId, status: SyncStatus) -> Result<()>;

    /// Read persisted settings; defaults when none were saved yet
    async fn settings(&self) -> Result<Settings>;

    /// Persist settings
    async fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Directory-backed JSON store, one document per reserved key.
pub struct JsonFileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the store's documents.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    async fn read_doc<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match tokio::fs::read(self.doc_path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_doc<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, self.doc_path(key)).await?;
        Ok(())
    }

    async fn read_status_map(&self) -> Result<HashMap<NoteId, SyncStatus>> {
        self.read_doc(STATUS_KEY).await
    }
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.read_doc(NOTES_KEY).await
    }

    async fn save_notes(&self, notes: &[Note]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_doc(NOTES_KEY, &notes).await
    }

    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        let notes = self.list_notes().await?;
        Ok(notes.into_iter().find(|note| note.id == *id))
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note> {
        let note = Note::new(title, content);

        let _guard = self.write_lock.lock().await;
        let mut notes: Vec<Note> = self.read_doc(NOTES_KEY).await?;
        notes.push(note.clone());
        self.write_doc(NOTES_KEY, &notes).await?;

        Ok(note)
    }

    async fn insert_note(&self, note: Note) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut notes: Vec<Note> = self.read_doc(NOTES_KEY).await?;
        if notes.iter().any(|existing| existing.id == note.id) {
            return Err(Error::InvalidInput(format!(
                "note {} already exists",
                note.id
            )));
        }
        notes.push(note);
        self.write_doc(NOTES_KEY, &notes).await
    }

    async fn update_note(&self, id: &NoteId, title: &str, content: &str) -> Result<Note> {
        let _guard = self.write_lock.lock().await;

        let mut notes: Vec<Note> = self.read_doc(NOTES_KEY).await?;
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        note.apply_edit(title, content);
        let updated = note.clone();
        self.write_doc(NOTES_KEY, &notes).await?;

        // An edit desyncs the note; dropping the entry reads as NotSynced.
        let mut status_map = self.read_status_map().await?;
        if status_map.remove(id).is_some() {
            self.write_doc(STATUS_KEY, &status_map).await?;
        }

        Ok(updated)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut notes: Vec<Note> = self.read_doc(NOTES_KEY).await?;
        let before = notes.len();
        notes.retain(|note| note.id != *id);
        if notes.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        self.write_doc(NOTES_KEY, &notes).await?;

        let mut status_map = self.read_status_map().await?;
        if status_map.remove(id).is_some() {
            self.write_doc(STATUS_KEY, &status_map).await?;
        }

        Ok(())
    }

    async fn status(&self, id: &NoteId) -> Result<SyncStatus> {
        let status_map = self.read_status_map().await?;
        Ok(status_map.get(id).copied().unwrap_or_default())
    }

    async fn set_status(&self, id: &NoteId, status: SyncStatus) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut status_map = self.read_status_map().await?;
        status_map.insert(*id, status);
        self.write_doc(STATUS_KEY, &status_map).await
    }

    async fn settings(&self) -> Result<Settings> {
        self.read_doc(SETTINGS_KEY).await
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_doc(SETTINGS_KEY, settings).await
    }
}
