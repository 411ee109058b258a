use std::path::{Path, PathBuf};

use hermit_core::cloud::{CloudContainer, RemoteStore};
use hermit_core::store::LocalStore;

use crate::commands::common::{open_store, resolve_note, resolve_remote_dir};
use crate::error::CliError;

pub async fn run_delete(
    id: &str,
    data_dir: &Path,
    remote_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let store = open_store(data_dir).await?;
    let note = resolve_note(store.as_ref(), id).await?;

    store.delete_note(&note.id).await?;

    // Best effort: drop the remote copy too when a container is configured.
    if let Ok(remote_dir) = resolve_remote_dir(remote_dir) {
        let container = CloudContainer::new(&remote_dir);
        if container.is_available().await {
            if let Err(error) = container.delete_note(&note.id).await {
                tracing::warn!(id = %note.id, %error, "could not delete remote copy");
            }
        }
    }

    println!("{}", note.id);
    Ok(())
}
