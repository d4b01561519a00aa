//! product-server: REST API for managing products
//!
//! ```text
//! product-server                  # serve on $PORT (default 4000)
//! product-server --port 8080      # override the port
//! product-server --clear          # drop and recreate the schema, then exit
//! ```

use anyhow::Context;
use clap::Parser;

use product_server::{Config, DbService, Server, ServerState, init_logger};

#[derive(Debug, Parser)]
#[command(name = "product-server", version, about = "REST API for managing products")]
struct Cli {
    /// Drop every table, recreate the schema and exit
    #[arg(long)]
    clear: bool,

    /// HTTP port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite connection string (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.http_port = port;
    }
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    init_logger(&config.log_level, config.log_dir.as_deref());

    if cli.clear {
        let db = DbService::connect_lazy(&config)?;
        db.reset().await.context("failed to reset the database")?;
        tracing::info!("🧹 Database cleared ({})", config.database_url);
        return Ok(());
    }

    tracing::info!("Starting product-server v{}", env!("CARGO_PKG_VERSION"));

    let state = ServerState::initialize(&config).await?;
    Server::new(state).run().await?;

    Ok(())
}
