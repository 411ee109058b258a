use std::path::Path;

use hermit_core::store::LocalStore;
use hermit_core::text::{key_topics, summarize};

use crate::commands::common::{open_store, resolve_note, status_label};
use crate::error::CliError;

const SUMMARY_MAX_LEN: usize = 150;
const MAX_TOPICS: usize = 5;

pub async fn run_show(id: &str, with_summary: bool, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir).await?;
    let note = resolve_note(store.as_ref(), id).await?;
    let status = store.status(&note.id).await?;

    println!("{}", note.title);
    println!("id:      {}", note.id);
    println!("created: {}", note.created_at.to_rfc3339());
    println!("updated: {}", note.updated_at.to_rfc3339());
    println!("status:  {}", status_label(status));
    println!();
    println!("{}", note.content);

    if with_summary {
        println!();
        println!("Summary: {}", summarize(&note.content, SUMMARY_MAX_LEN));
        let topics = key_topics(&note.content, MAX_TOPICS);
        if !topics.is_empty() {
            println!("Topics:  {}", topics.join(", "));
        }
    }

    Ok(())
}
