//! Hermit CLI - capture and sync personal notes from the terminal.

use clap::{CommandFactory, Parser};

mod cli;
mod commands;
mod error;

use cli::{Cli, Commands, SyncCommands};
use commands::{
    run_add, run_delete, run_disable, run_edit, run_enable, run_list, run_pull, run_push,
    run_search, run_show, run_status,
};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hermit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = commands::resolve_data_dir(cli.data_dir);
    let remote_dir = cli.remote_dir;

    match cli.command {
        Some(Commands::Add { title, content }) => {
            run_add(title.as_deref(), &content, &data_dir, remote_dir).await?;
        }
        Some(Commands::List { limit, json }) => run_list(limit, json, &data_dir).await?,
        Some(Commands::Search { query, limit, json }) => {
            run_search(&query, limit, json, &data_dir).await?;
        }
        Some(Commands::Show { id, summary }) => run_show(&id, summary, &data_dir).await?,
        Some(Commands::Edit { id, title, content }) => {
            run_edit(
                &id,
                title.as_deref(),
                content.as_deref(),
                &data_dir,
                remote_dir,
            )
            .await?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, &data_dir, remote_dir).await?,
        Some(Commands::Sync { command }) => match command {
            SyncCommands::Push { id } => run_push(id.as_deref(), &data_dir, remote_dir).await?,
            SyncCommands::Pull => run_pull(&data_dir, remote_dir).await?,
            SyncCommands::Status => run_status(&data_dir).await?,
            SyncCommands::On => run_enable(&data_dir, remote_dir).await?,
            SyncCommands::Off => run_disable(&data_dir).await?,
        },
        None => {
            // Quick capture mode: hermit "my note"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(None, &cli.note, &data_dir, remote_dir).await?;
            }
        }
    }

    Ok(())
}
