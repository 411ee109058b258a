//! Application settings model

use serde::{Deserialize, Serialize};

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether cloud sync is enabled; flipping this on triggers a full push
    pub sync_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sync_enabled: true }
    }
}
