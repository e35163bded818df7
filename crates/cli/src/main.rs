mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exam_results_core::{AppConfig, DEFAULT_IMPORT_PROGRESS_EVERY, DatabaseConfig};
use exam_results_storage::StorageBackend;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "exam-results")]
#[command(about = "Search and look up student examination results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Upsert student records from a JSON-lines file
    Import {
        file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_IMPORT_PROGRESS_EVERY)]
        progress_every: u64,
    },
    /// Upsert the built-in sample records
    SeedSample,
    /// Search students by name
    Search {
        phrase: String,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Expanded mode: up to 1000 results
        #[arg(short, long)]
        all: bool,
        /// Query a running server instead of the local database
        #[arg(long)]
        server: Option<String>,
    },
    /// Print the full record for an index number
    Get {
        index_number: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Create an auxiliary user account
    AddUser { username: String, password: String },
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Open the backend selected by the environment.
pub(crate) async fn open_storage() -> Result<Arc<StorageBackend>> {
    let config = AppConfig::from_env();
    if let DatabaseConfig::Sqlite { path } = &config.database {
        ensure_db_dir(path)?;
    }
    let storage = StorageBackend::open(&config).await?;
    tracing::debug!(backend = storage.kind(), "storage opened");
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { port: 5000, host: "127.0.0.1".to_owned() }) {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Import { file, progress_every } => {
            commands::import::run_import(&file, progress_every).await?;
        },
        Commands::SeedSample => commands::import::run_seed_sample().await?,
        Commands::Search { phrase, limit, all, server } => {
            commands::search::run_search(&phrase, limit, all, server.as_deref()).await?;
        },
        Commands::Get { index_number, server } => {
            commands::search::run_get(&index_number, server.as_deref()).await?;
        },
        Commands::AddUser { username, password } => {
            commands::users::run_add_user(&username, &password).await?;
        },
    }

    Ok(())
}
