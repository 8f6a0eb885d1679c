//! Todo Lists Web Application Library
//!
//! This library provides a small web application for managing todo lists:
//! create named lists, add, complete and delete todos within each list, and
//! see at a glance which lists are done.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **HTTP Layer**: `routes` decodes requests, `handlers` implements one
//!   operation per route on [`TodoApp`], `formatting` renders HTML pages
//! - **Domain Layer**: `todo` holds the data model and display ordering,
//!   `validation` checks list and todo names
//! - **Persistence Layer**: [`Storage`] - SQLite tables `lists` and `todos`
//!
//! # Example
//!
//! ```no_run
//! use todo_lists::{AppConfig, TodoApp, routes::create_router};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::default();
//!     let app = TodoApp::connect(&config).await?;
//!     let router = create_router(app);
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flash;
pub mod formatting;
pub mod handlers;
pub mod routes;
mod storage;
pub mod todo;
pub mod validation;

use std::sync::Arc;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use formatting::Templates;
pub use storage::{Storage, is_unique_violation};
pub use todo::{List, Todo};

/// Shared state of the web application
///
/// Holds the storage gateway and the compiled templates. It is cloned into
/// every request by axum; clones share the same connection pool.
#[derive(Clone)]
pub struct TodoApp {
    pub(crate) storage: Storage,
    pub(crate) templates: Arc<Templates>,
}

impl TodoApp {
    /// Create an application from already constructed parts
    pub fn new(storage: Storage, templates: Templates) -> Self {
        Self {
            storage,
            templates: Arc::new(templates),
        }
    }

    /// Connect to the configured database and compile the templates
    ///
    /// # Arguments
    /// * `config` - Database URL and pool size are read from here
    ///
    /// # Returns
    /// Result containing the application or a database/template error
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let storage = Storage::connect(&config.database_url, config.max_connections).await?;
        Ok(Self::new(storage, Templates::new()?))
    }

    /// Application backed by a fresh in-memory database
    pub async fn in_memory() -> AppResult<Self> {
        let storage = Storage::in_memory().await?;
        Ok(Self::new(storage, Templates::new()?))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
