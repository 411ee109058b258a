//! Synchronization engine.
//!
//! Orchestrates push (local to remote) and pull (remote to local),
//! resolves conflicts by last-writer-wins on `updated_at`, and drives the
//! per-note status map. Constructed explicitly with store handles so tests
//! can substitute fakes; there is no process-wide instance.
//!
//! Push is fire-and-forget safe: it resolves to a boolean and records its
//! outcome in the status map and on the event bus, it never propagates an
//! internal error. Wall-clock last-writer-wins is a known weakness:
//! concurrent edits on two devices within one clock tick, or with skewed
//! clocks, can silently lose one side's edit. Ties keep the local copy.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::cloud::RemoteStore;
use crate::companion::CompanionNote;
use crate::error::Result;
use crate::events::{Event, EventBus};
use crate::models::{Note, NoteId, SyncStatus};
use crate::store::LocalStore;
use crate::sync::SyncStatusTracker;

/// Handle for signaling that the remote store changed outside this process.
///
/// `notify` is cheap and non-blocking: signals arriving while a pull is in
/// flight coalesce to at most one follow-up pull, never a queue.
#[derive(Clone)]
pub struct RemoteChangeNotifier {
    tx: mpsc::Sender<()>,
}

impl RemoteChangeNotifier {
    /// Request a pull. Coalesced; safe to call from any thread.
    pub fn notify(&self) {
        let _ = self.tx.try_send(());
    }
}

struct Inner {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    bus: EventBus,
    tracker: SyncStatusTracker,
    // At most one pull cycle in flight.
    pull_latch: Mutex<()>,
}

/// Orchestrates cross-device note synchronization.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<Inner>,
}

impl SyncEngine {
    #[must_use]
    pub fn new(local: Arc<dyn LocalStore>, remote: Arc<dyn RemoteStore>, bus: EventBus) -> Self {
        let tracker = SyncStatusTracker::new(Arc::clone(&local));
        Self {
            inner: Arc::new(Inner {
                local,
                remote,
                bus,
                tracker,
                pull_latch: Mutex::new(()),
            }),
        }
    }

    /// The bus this engine publishes lifecycle events on.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    /// Per-note status tracker backed by the local store.
    #[must_use]
    pub fn status_tracker(&self) -> &SyncStatusTracker {
        &self.inner.tracker
    }

    /// Whether the user has sync enabled.
    pub async fn sync_enabled(&self) -> Result<bool> {
        Ok(self.inner.local.settings().await?.sync_enabled)
    }

    /// Persist the sync preference. Flipping it from off to on triggers a
    /// full push.
    pub async fn set_sync_enabled(&self, enabled: bool) -> Result<()> {
        let mut settings = self.inner.local.settings().await?;
        let was_enabled = settings.sync_enabled;
        settings.sync_enabled = enabled;
        self.inner.local.save_settings(&settings).await?;

        if enabled && !was_enabled {
            self.push_all().await;
        }
        Ok(())
    }

    /// Push one note's current state to the remote store.
    ///
    /// Preconditions: sync enabled and the remote available. When either
    /// fails the note's status is left untouched and nothing is emitted.
    /// Otherwise the note transitions `Syncing` then `Synced` (emitting
    /// [`Event::NoteSynced`]) or `Failed`.
    pub async fn push(&self, note: &Note) -> bool {
        if !self.preconditions_met().await {
            return false;
        }

        self.record_status(&note.id, SyncStatus::Syncing).await;
        match self.inner.remote.write_note(note).await {
            Ok(()) => {
                self.record_status(&note.id, SyncStatus::Synced).await;
                self.inner.bus.emit(&Event::NoteSynced(note.clone()));
                true
            }
            Err(error) => {
                tracing::warn!(id = %note.id, %error, "push failed");
                self.record_status(&note.id, SyncStatus::Failed).await;
                false
            }
        }
    }

    /// Push every local note concurrently.
    ///
    /// Individual failures are independent: they land in the status map
    /// without aborting the rest. Emits [`Event::SyncStarted`] /
    /// [`Event::SyncCompleted`] around the batch, or a single
    /// [`Event::SyncFailed`] when the operation cannot run at all.
    pub async fn push_all(&self) -> bool {
        if !self.preconditions_met().await {
            self.inner
                .bus
                .emit(&Event::SyncFailed("remote store unavailable".to_string()));
            return false;
        }

        let notes = match self.inner.local.list_notes().await {
            Ok(notes) => notes,
            Err(error) => {
                tracing::warn!(%error, "push_all could not read local notes");
                self.inner.bus.emit(&Event::SyncFailed(error.to_string()));
                return false;
            }
        };

        self.inner.bus.emit(&Event::SyncStarted);

        let mut pushes = JoinSet::new();
        for note in notes {
            let engine = self.clone();
            pushes.spawn(async move { engine.push(&note).await });
        }
        while let Some(joined) = pushes.join_next().await {
            if let Err(error) = joined {
                tracing::warn!(%error, "push task failed to join");
            }
        }

        self.inner.bus.emit(&Event::SyncCompleted);
        true
    }

    /// Reconcile remote note state into the local store.
    ///
    /// A note that only exists remotely is appended; a note present on
    /// both sides is replaced iff the remote copy is strictly newer.
    /// Unreadable remote notes are skipped, the enumeration continues.
    /// The reconciled collection is written back in one batch, and only
    /// when the merge changed anything.
    pub async fn pull(&self) -> bool {
        if !self.inner.remote.is_available().await {
            return false;
        }

        let _latch = self.inner.pull_latch.lock().await;
        self.pull_locked().await
    }

    async fn pull_locked(&self) -> bool {
        let remote_ids = match self.inner.remote.list_note_ids().await {
            Ok(ids) => ids,
            Err(error) => {
                tracing::warn!(%error, "pull could not enumerate remote notes");
                return false;
            }
        };

        let mut notes = match self.inner.local.list_notes().await {
            Ok(notes) => notes,
            Err(error) => {
                tracing::warn!(%error, "pull could not read local notes");
                return false;
            }
        };

        let mut index: HashMap<NoteId, usize> = notes
            .iter()
            .enumerate()
            .map(|(position, note)| (note.id, position))
            .collect();

        let mut merged: Vec<NoteId> = Vec::new();
        for id in remote_ids {
            let remote_note = match self.inner.remote.read_note(&id).await {
                Ok(Some(note)) => note,
                Ok(None) => continue,
                Err(error) => {
                    // One bad object must not abort the whole pull.
                    tracing::warn!(%id, %error, "skipping unreadable remote note");
                    continue;
                }
            };

            if let Some(&position) = index.get(&remote_note.id) {
                if remote_note.updated_at > notes[position].updated_at {
                    merged.push(remote_note.id);
                    notes[position] = remote_note;
                }
            } else {
                index.insert(remote_note.id, notes.len());
                merged.push(remote_note.id);
                notes.push(remote_note);
            }
        }

        if merged.is_empty() {
            return true;
        }

        if let Err(error) = self.inner.local.save_notes(&notes).await {
            tracing::warn!(%error, "pull could not write reconciled notes");
            return false;
        }
        // Merged notes now match their remote copy.
        for id in merged {
            self.record_status(&id, SyncStatus::Synced).await;
        }

        true
    }

    /// Spawn a listener that pulls once per remote-change signal.
    ///
    /// The returned notifier feeds a bounded channel: a signal arriving
    /// while a pull runs schedules exactly one follow-up pull, further
    /// signals in that window are dropped. The listener stops when every
    /// clone of the notifier is dropped.
    #[must_use]
    pub fn remote_change_notifier(&self) -> RemoteChangeNotifier {
        let (tx, mut rx) = mpsc::channel(1);
        let engine = self.clone();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                engine.pull().await;
            }
        });
        RemoteChangeNotifier { tx }
    }

    /// Intake a note originating on a companion device.
    ///
    /// The payload becomes a freshly created local note (new id,
    /// timestamps from the device clock), [`Event::NoteReceived`] is
    /// emitted, and a best-effort push follows when sync is enabled.
    pub async fn receive_companion_note(&self, payload: CompanionNote) -> Result<Note> {
        let note = Note::from_companion(&payload);
        self.inner.local.insert_note(note.clone()).await?;

        self.inner.bus.emit(&Event::NoteReceived {
            title: payload.title,
            content: payload.content,
            timestamp: payload.timestamp,
        });

        self.push(&note).await;
        Ok(note)
    }

    async fn preconditions_met(&self) -> bool {
        let enabled = match self.inner.local.settings().await {
            Ok(settings) => settings.sync_enabled,
            Err(error) => {
                tracing::warn!(%error, "could not read sync preference, skipping sync");
                false
            }
        };
        enabled && self.inner.remote.is_available().await
    }

    async fn record_status(&self, id: &NoteId, status: SyncStatus) {
        if let Err(error) = self.inner.tracker.update(id, status).await {
            tracing::warn!(%id, ?status, %error, "failed to record sync status");
        }
    }
}
