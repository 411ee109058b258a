use std::path::{Path, PathBuf};

use hermit_core::store::LocalStore;

use crate::commands::common::{open_store, push_best_effort, resolve_note};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<&str>,
    content: Option<&str>,
    data_dir: &Path,
    remote_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    if title.is_none() && content.is_none() {
        return Err(CliError::NothingToEdit);
    }

    let store = open_store(data_dir).await?;
    let note = resolve_note(store.as_ref(), id).await?;

    let updated = store
        .update_note(
            &note.id,
            title.unwrap_or(note.title.as_str()),
            content.unwrap_or(note.content.as_str()),
        )
        .await?;

    push_best_effort(store, remote_dir, &updated).await;

    println!("{}", updated.id);
    Ok(())
}
