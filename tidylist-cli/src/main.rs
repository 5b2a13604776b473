use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    AddCommand, ConfigCommand, DoneCommand, EditCommand, ListCommand, RemoveCommand,
};
use config::Config;
use tidylist_core::{FileStore, PersistenceSync, TodoStore};

#[derive(Parser)]
#[command(name = "tidy")]
#[command(version)]
#[command(about = "A personal todo list that persists between runs", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new todo
    Add(AddCommand),

    /// List todos
    List(ListCommand),

    /// Toggle a todo between done and not done
    Done(DoneCommand),

    /// Replace a todo's text
    Edit(EditCommand),

    /// Delete a todo
    Rm(RemoveCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidylist_core=warn,tidy=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Add(cmd)) => {
            let (sync, mut todos) = open_todos(&config).await;
            cmd.run(&mut todos)?;
            sync.flush().await;
        }
        Some(Commands::List(cmd)) => {
            let (_sync, todos) = open_todos(&config).await;
            cmd.run(&todos)?;
        }
        Some(Commands::Done(cmd)) => {
            let (sync, mut todos) = open_todos(&config).await;
            cmd.run(&mut todos)?;
            sync.flush().await;
        }
        Some(Commands::Edit(cmd)) => {
            let (sync, mut todos) = open_todos(&config).await;
            cmd.run(&mut todos)?;
            sync.flush().await;
        }
        Some(Commands::Rm(cmd)) => {
            let (sync, mut todos) = open_todos(&config).await;
            cmd.run(&mut todos)?;
            sync.flush().await;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Builds the hydrated todo store and its persistence sync.
///
/// Mutating commands must await [`PersistenceSync::flush`] before exiting so
/// queued saves reach the data directory.
async fn open_todos(config: &Config) -> (PersistenceSync, TodoStore) {
    tracing::debug!("data dir: {}", config.data_dir.value.display());

    let kv = Arc::new(FileStore::new(config.data_dir.value.clone()));
    let sync = PersistenceSync::new(kv);

    let mut todos = TodoStore::new();
    sync.load(&mut todos).await;
    todos.subscribe(Box::new(sync.hook()));

    (sync, todos)
}
