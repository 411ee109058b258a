//! Per-note sync status tracking.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{NoteId, SyncStatus};
use crate::store::LocalStore;

/// Mapping utility over the local store's reserved status document.
///
/// Entries are created lazily on the first sync attempt; a note with no
/// entry reads as [`SyncStatus::NotSynced`]. Updates overwrite
/// unconditionally, no history is kept.
#[derive(Clone)]
pub struct SyncStatusTracker {
    local: Arc<dyn LocalStore>,
}

impl SyncStatusTracker {
    #[must_use]
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }

    /// Current status for a note.
    pub async fn get(&self, id: &NoteId) -> Result<SyncStatus> {
        self.local.status(id).await
    }

    /// Overwrite a note's status.
    pub async fn update(&self, id: &NoteId, status: SyncStatus) -> Result<()> {
        self.local.set_status(id, status).await
    }
}
