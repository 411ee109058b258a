use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hermit")]
#[command(about = "Personal notes with cross-device sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local note store directory
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Optional path to the synchronized cloud container
    #[arg(long, global = true, value_name = "PATH")]
    pub remote_dir: Option<PathBuf>,

    /// Quick capture: hermit "my note here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title (falls back to "Untitled Note")
        #[arg(long)]
        title: Option<String>,
        /// Note content
        content: Vec<String>,
    },
    /// List recent notes
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes by title and content
    Search {
        /// Search query
        query: String,
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Also print a generated summary and key topics
        #[arg(long)]
        summary: bool,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Synchronize notes with the cloud container
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Push one note (or all notes) to the remote container
    Push {
        /// Note ID or unique ID prefix; pushes everything when omitted
        id: Option<String>,
    },
    /// Pull remote changes into the local store
    Pull,
    /// Show per-note sync status
    Status,
    /// Enable sync and push all notes
    On,
    /// Disable sync
    Off,
}
