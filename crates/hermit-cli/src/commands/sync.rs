use std::path::{Path, PathBuf};

use hermit_core::store::LocalStore;
use hermit_core::SyncStatus;

use crate::commands::common::{
    open_engine, open_store, resolve_note, resolve_remote_dir, status_label,
};
use crate::error::CliError;

pub async fn run_push(
    id: Option<&str>,
    data_dir: &Path,
    remote_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let remote_dir = resolve_remote_dir(remote_dir)?;
    let store = open_store(data_dir).await?;
    let engine = open_engine(store.clone(), &remote_dir);

    if let Some(id) = id {
        let note = resolve_note(store.as_ref(), id).await?;
        if !engine.push(&note).await {
            if store.status(&note.id).await? == SyncStatus::Failed {
                return Err(CliError::PushFailed(note.id.to_string()));
            }
            return Err(CliError::SyncSkipped);
        }
        println!("{} synced", note.id);
        return Ok(());
    }

    if !engine.push_all().await {
        return Err(CliError::SyncSkipped);
    }

    let notes = store.list_notes().await?;
    let mut synced = 0usize;
    let mut failed = 0usize;
    for note in &notes {
        match store.status(&note.id).await? {
            SyncStatus::Synced => synced += 1,
            SyncStatus::Failed => failed += 1,
            SyncStatus::NotSynced | SyncStatus::Syncing => {}
        }
    }

    if failed == 0 {
        println!("Sync completed: {synced} notes synced");
    } else {
        println!("Sync completed: {synced} synced, {failed} failed");
    }
    Ok(())
}

pub async fn run_pull(data_dir: &Path, remote_dir: Option<PathBuf>) -> Result<(), CliError> {
    let remote_dir = resolve_remote_dir(remote_dir)?;
    let store = open_store(data_dir).await?;
    let engine = open_engine(store, &remote_dir);

    if !engine.pull().await {
        return Err(CliError::RemoteUnavailable);
    }
    println!("Pull completed");
    Ok(())
}

pub async fn run_status(data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir).await?;

    let sync_enabled = store.settings().await?.sync_enabled;
    println!("sync: {}", if sync_enabled { "on" } else { "off" });

    let mut notes = store.list_notes().await?;
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    for note in notes {
        let status = store.status(&note.id).await?;
        let id = note.id.to_string();
        let short_id = id.chars().take(13).collect::<String>();
        println!("{short_id:<13}  {:<10}  {}", status_label(status), note.title);
    }
    Ok(())
}

pub async fn run_enable(data_dir: &Path, remote_dir: Option<PathBuf>) -> Result<(), CliError> {
    let remote_dir = resolve_remote_dir(remote_dir)?;
    let store = open_store(data_dir).await?;
    let engine = open_engine(store, &remote_dir);

    engine.set_sync_enabled(true).await?;
    println!("Sync enabled");
    Ok(())
}

pub async fn run_disable(data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir).await?;

    let mut settings = store.settings().await?;
    settings.sync_enabled = false;
    store.save_settings(&settings).await?;
    println!("Sync disabled");
    Ok(())
}
