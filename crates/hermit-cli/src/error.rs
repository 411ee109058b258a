use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] hermit_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Provide --title and/or --content to edit a note")]
    NothingToEdit,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error(
        "No remote container configured. Pass --remote-dir or set HERMIT_REMOTE_DIR to the synchronized folder."
    )]
    RemoteNotConfigured,
    #[error("Remote container is not available")]
    RemoteUnavailable,
    #[error("Sync did not run: sync is disabled or the remote container is unavailable")]
    SyncSkipped,
    #[error("Push failed for note {0}")]
    PushFailed(String),
}
