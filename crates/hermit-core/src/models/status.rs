//! Per-note sync status

use serde::{Deserialize, Serialize};

/// Lifecycle label tracking a note's push progress and outcome.
///
/// A note with no recorded entry is `NotSynced`. Only the sync engine
/// transitions these values; a local edit regresses the note to
/// `NotSynced` via the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    /// Never pushed, or desynced by a local edit
    #[default]
    NotSynced,
    /// A push is in flight
    Syncing,
    /// Remote copy matches the last pushed state
    Synced,
    /// The last push attempt failed
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SyncStatus::NotSynced).unwrap(),
            "\"not-synced\""
        );
        assert_eq!(
            serde_json::to_string(&SyncStatus::Synced).unwrap(),
            "\"synced\""
        );
    }

    #[test]
    fn test_default_is_not_synced() {
        assert_eq!(SyncStatus::default(), SyncStatus::NotSynced);
    }
}
