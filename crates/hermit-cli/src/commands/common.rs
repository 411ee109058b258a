//! Shared helpers for CLI commands.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hermit_core::cloud::CloudContainer;
use hermit_core::events::EventBus;
use hermit_core::store::{JsonFileStore, LocalStore};
use hermit_core::sync::SyncEngine;
use hermit_core::{Note, SyncStatus};
use serde::Serialize;

use crate::error::CliError;

pub const ENV_REMOTE_DIR: &str = "HERMIT_REMOTE_DIR";

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
    pub status: SyncStatus,
}

/// Resolve the local store directory: explicit flag, then the platform
/// data dir, then a dotted folder in the working directory.
pub fn resolve_data_dir(override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| {
        dirs::data_local_dir().map_or_else(|| PathBuf::from(".hermit"), |dir| dir.join("hermit"))
    })
}

/// Resolve the synchronized container directory: explicit flag, then the
/// `HERMIT_REMOTE_DIR` environment variable.
pub fn resolve_remote_dir(override_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    env::var(ENV_REMOTE_DIR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .ok_or(CliError::RemoteNotConfigured)
}

pub async fn open_store(data_dir: &Path) -> Result<Arc<JsonFileStore>, CliError> {
    Ok(Arc::new(JsonFileStore::open(data_dir).await?))
}

pub fn open_engine(store: Arc<JsonFileStore>, remote_dir: &Path) -> SyncEngine {
    SyncEngine::new(
        store,
        Arc::new(CloudContainer::new(remote_dir)),
        EventBus::new(),
    )
}

/// Push a freshly written note when a remote container is configured.
///
/// Capture must never fail because sync cannot run, so every failure path
/// here is silent (the engine records per-note status regardless).
pub async fn push_best_effort(
    store: Arc<JsonFileStore>,
    remote_dir: Option<PathBuf>,
    note: &Note,
) {
    let Ok(remote_dir) = resolve_remote_dir(remote_dir) else {
        return;
    };
    let engine = open_engine(store, &remote_dir);
    engine.push(note).await;
}

/// Find a note by full id or unique id prefix.
pub async fn resolve_note(store: &dyn LocalStore, query: &str) -> Result<Note, CliError> {
    let query = normalize_note_identifier(query)?;

    let notes = store.list_notes().await?;
    let matches: Vec<&Note> = notes
        .iter()
        .filter(|note| note.id.to_string().starts_with(&query))
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::NoteNotFound(query)),
        [note] => Ok((*note).clone()),
        _ => Err(CliError::AmbiguousNoteId(format!(
            "Id prefix '{query}' matches {} notes; use more characters",
            matches.len()
        ))),
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    let joined = content_parts.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn note_to_list_item(note: &Note, status: SyncStatus) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note.content_preview(80),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at, Utc::now()),
        status,
    }
}

pub fn format_note_lines(notes: &[(Note, SyncStatus)]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|(note, status)| {
            let id = note.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let title: String = note.title.chars().take(24).collect();
            let relative_time = format_relative_time(note.updated_at, now);
            format!(
                "{short_id:<13}  {title:<24}  {relative_time:<10}  {}",
                status_label(*status)
            )
        })
        .collect()
}

pub const fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::NotSynced => "not-synced",
        SyncStatus::Syncing => "syncing",
        SyncStatus::Synced => "synced",
        SyncStatus::Failed => "failed",
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp).num_milliseconds();
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
