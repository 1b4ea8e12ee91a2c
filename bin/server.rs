// Library Catalog - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use library_catalog::server::{router, AppState};
use library_catalog::{init_logging, BookStore, Config};

#[derive(Parser)]
#[command(name = "library-server")]
#[command(about = "HTTP API for the library catalog", long_about = None)]
#[command(version)]
struct Args {
    /// SQLite database file (overrides LIBRARY_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Address to listen on (overrides LIBRARY_BIND)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()
        .with_db_path(args.db)
        .with_bind_addr(args.bind);
    init_logging(&config.log_filter)?;

    let store = BookStore::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;

    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, db = %config.db_path.display(), "server running");
    println!("Server running on http://{}", config.bind_addr);
    println!("   API: http://{}/api/books", config.bind_addr);
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app)
        .await
        .context("server stopped with an error")?;

    Ok(())
}
