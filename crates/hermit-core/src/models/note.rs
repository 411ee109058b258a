//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::companion::CompanionNote;

/// Fallback title for notes saved without one.
pub const UNTITLED: &str = "Untitled Note";

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system
///
/// Serialized with camelCase timestamps (`createdAt`/`updatedAt`) to match
/// the on-disk format shared with other devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, immutable once created
    pub id: NoteId,
    /// Display title; never empty (falls back to [`UNTITLED`])
    pub title: String,
    /// Text body; sync treats it as opaque
    pub content: String,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp; the sole conflict-resolution signal
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note with the given title and content
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: normalize_title(title.into()),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a note from a companion-device payload.
    ///
    /// Gets a fresh id; both timestamps derive from the payload's
    /// epoch-seconds timestamp.
    #[must_use]
    pub fn from_companion(payload: &CompanionNote) -> Self {
        // Out-of-range device timestamps fall back to the receive time.
        let at = DateTime::from_timestamp(payload.timestamp, 0).unwrap_or_else(Utc::now);
        Self {
            id: NoteId::new(),
            title: normalize_title(payload.title.clone()),
            content: payload.content.clone(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Replace title and content, touching `updated_at`
    pub fn apply_edit(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = normalize_title(title.into());
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against title and content
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }

    /// Body preview for list display: leading markup lines stripped,
    /// truncated to `max_len` characters with an ellipsis.
    #[must_use]
    pub fn content_preview(&self, max_len: usize) -> String {
        let plain = self
            .content
            .lines()
            .filter(|line| {
                let trimmed = line.trim_start();
                !(trimmed.starts_with('#')
                    || trimmed.starts_with('*')
                    || (trimmed.starts_with('_') && trimmed.ends_with('_') && trimmed.len() > 1))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let plain = plain.trim();

        let preview: String = plain.chars().take(max_len).collect();
        if plain.chars().count() > max_len {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

fn normalize_title(title: String) -> String {
    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_note_new() {
        let note = Note::new("Shopping", "milk, eggs");
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_empty_title_falls_back() {
        let note = Note::new("   ", "body");
        assert_eq!(note.title, UNTITLED);
    }

    #[test]
    fn test_apply_edit_touches_updated_at() {
        let mut note = Note::new("Before", "old");
        let created = note.created_at;
        note.apply_edit("After", "new");
        assert_eq!(note.title, "After");
        assert_eq!(note.content, "new");
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= note.created_at);
    }

    #[test]
    fn test_serializes_camel_case_timestamps() {
        let note = Note::new("T", "c");
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let note = Note::new("T", "c");
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn test_from_companion_derives_timestamps() {
        let payload = CompanionNote {
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
            timestamp: 1_700_000_000,
        };
        let note = Note::from_companion(&payload);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.created_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_matches_query_ignores_case() {
        let note = Note::new("Groceries", "Milk and eggs");
        assert!(note.matches_query("groc"));
        assert!(note.matches_query("EGGS"));
        assert!(!note.matches_query("quinoa"));
    }

    #[test]
    fn test_content_preview_strips_markup_lines() {
        let note = Note::new("T", "# Heading\nplain body text\n* bullet");
        assert_eq!(note.content_preview(50), "plain body text");
    }

    #[test]
    fn test_content_preview_truncates() {
        let note = Note::new("T", "abcdefghij");
        assert_eq!(note.content_preview(4), "abcd...");
        assert_eq!(note.content_preview(10), "abcdefghij");
    }
}
