use std::path::{Path, PathBuf};

use hermit_core::store::LocalStore;

use crate::commands::common::{open_store, push_best_effort, resolve_note_content};
use crate::error::CliError;

pub async fn run_add(
    title: Option<&str>,
    content_parts: &[String],
    data_dir: &Path,
    remote_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let store = open_store(data_dir).await?;
    let note = store
        .create_note(title.unwrap_or_default(), &content)
        .await?;

    push_best_effort(store, remote_dir, &note).await;

    println!("{}", note.id);
    Ok(())
}
