use std::path::Path;

use hermit_core::store::LocalStore;

use crate::commands::common::{format_note_lines, note_to_list_item, open_store, NoteListItem};
use crate::error::CliError;

pub async fn run_list(limit: usize, as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir).await?;

    // Newest first, as the notes list screen shows them.
    let mut notes = store.list_notes().await?;
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notes.truncate(limit);

    let mut rows = Vec::with_capacity(notes.len());
    for note in notes {
        let status = store.status(&note.id).await?;
        rows.push((note, status));
    }

    if as_json {
        let items: Vec<NoteListItem> = rows
            .iter()
            .map(|(note, status)| note_to_list_item(note, *status))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_note_lines(&rows) {
            println!("{line}");
        }
    }

    Ok(())
}
