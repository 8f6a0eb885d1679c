//! Todo Lists - Main Entry Point
//!
//! This is the main entry point for the todo lists web server.
//! The actual implementation is in the `todo_lists` library.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use todo_lists::config::{Environment, Overrides};
use todo_lists::routes::create_router;
use todo_lists::{AppConfig, TodoApp};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Todo Lists - manage named todo lists from the browser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, env = "TODO_LISTS_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite connection string (e.g. sqlite://todos.db?mode=rwc)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Address to listen on
    #[arg(long, env = "TODO_LISTS_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "TODO_LISTS_PORT")]
    port: Option<u16>,

    /// Deployment environment: development or production
    #[arg(long, env = "TODO_LISTS_ENV")]
    environment: Option<Environment>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            database_url: self.database_url.clone(),
            host: self.host.clone(),
            port: self.port,
            environment: self.environment,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?.with_overrides(args.overrides());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(fmt::layer())
        .init();

    info!(
        environment = ?config.environment,
        database_url = %config.database_url,
        "Starting todo lists server"
    );

    let app = TodoApp::connect(&config)
        .await
        .context("Failed to initialize the application")?;
    let router = create_router(app).layer(TraceLayer::new_for_http());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
