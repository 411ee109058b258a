//! Companion-device message payloads.
//!
//! A paired watch can originate notes over its message channel. The payload
//! carries no id; intake assigns a fresh one and derives both timestamps
//! from the device's epoch-seconds clock, after which the note is
//! indistinguishable from one created locally.

use serde::{Deserialize, Serialize};

/// A note-like payload received from a companion device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionNote {
    /// Display title as entered on the device
    pub title: String,
    /// Text body
    pub content: String,
    /// Capture time in epoch seconds
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let json = r#"{"title":"Groceries","content":"milk, eggs","timestamp":1700000000}"#;
        let payload: CompanionNote = serde_json::from_str(json).unwrap();
        assert_eq!(payload.title, "Groceries");
        assert_eq!(payload.timestamp, 1_700_000_000);

        let back = serde_json::to_string(&payload).unwrap();
        let again: CompanionNote = serde_json::from_str(&back).unwrap();
        assert_eq!(again, payload);
    }
}
