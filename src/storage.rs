//! SQLite persistence for lists and todos
//!
//! `Storage` is the only component that talks to the database. Every mutating
//! method runs as a single statement or a single transaction, so each call is
//! atomic on its own.

use crate::todo::{List, Todo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

const CREATE_LISTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS lists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )";

const CREATE_TODOS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        list_id INTEGER NOT NULL REFERENCES lists (id)
    )";

/// Whether `error` is a `UNIQUE` constraint failure, e.g. a list name that
/// was taken between validation and the write
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.is_unique_violation())
}

#[derive(Debug, sqlx::FromRow)]
struct ListRow {
    id: i64,
    name: String,
}

#[derive(Clone, Debug)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Connect to the database at `url` and create the schema if needed
    ///
    /// # Arguments
    /// * `url` - SQLite connection string (e.g. `sqlite://todos.db?mode=rwc`)
    /// * `max_connections` - Upper bound of the connection pool
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.setup_schema().await?;
        Ok(storage)
    }

    /// Open a private in-memory database
    ///
    /// Every SQLite in-memory connection is a separate database, so the pool
    /// is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.setup_schema().await?;
        Ok(storage)
    }

    async fn setup_schema(&self) -> Result<(), sqlx::Error> {
        debug!("Ensuring lists and todos tables exist");
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_LISTS_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_TODOS_TABLE).execute(&mut *tx).await?;
        tx.commit().await
    }

    /// Load every list with its todos, ordered by id
    pub async fn all_lists(&self) -> Result<Vec<List>, sqlx::Error> {
        debug!("SELECT id, name FROM lists");
        let rows: Vec<ListRow> = sqlx::query_as("SELECT id, name FROM lists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        debug!("SELECT id, name, completed, list_id FROM todos");
        let todos: Vec<Todo> =
            sqlx::query_as("SELECT id, name, completed, list_id FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut todos_by_list: HashMap<i64, Vec<Todo>> = HashMap::new();
        for todo in todos {
            todos_by_list.entry(todo.list_id).or_default().push(todo);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let todos = todos_by_list.remove(&row.id).unwrap_or_default();
                List::new(row.id, row.name).with_todos(todos)
            })
            .collect())
    }

    /// Load one list with its todos
    ///
    /// # Returns
    /// `Ok(None)` if no list has this id
    pub async fn find_list(&self, list_id: i64) -> Result<Option<List>, sqlx::Error> {
        debug!(list_id, "SELECT id, name FROM lists WHERE id = ?");
        let row: Option<ListRow> = sqlx::query_as("SELECT id, name FROM lists WHERE id = ?")
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let todos = self.find_todos_for_list(list_id).await?;
        Ok(Some(List::new(row.id, row.name).with_todos(todos)))
    }

    /// Insert a list and return its generated id
    pub async fn create_list(&self, name: &str) -> Result<i64, sqlx::Error> {
        debug!(list_name = name, "INSERT INTO lists (name) VALUES (?)");
        let result = sqlx::query("INSERT INTO lists (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn rename_list(&self, list_id: i64, name: &str) -> Result<(), sqlx::Error> {
        debug!(list_id, list_name = name, "UPDATE lists SET name = ? WHERE id = ?");
        sqlx::query("UPDATE lists SET name = ? WHERE id = ?")
            .bind(name)
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a list together with all of its todos
    pub async fn delete_list(&self, list_id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        debug!(list_id, "DELETE FROM todos WHERE list_id = ?");
        sqlx::query("DELETE FROM todos WHERE list_id = ?")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        debug!(list_id, "DELETE FROM lists WHERE id = ?");
        sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    /// Insert a todo under a list and return its generated id
    pub async fn create_todo(&self, list_id: i64, name: &str) -> Result<i64, sqlx::Error> {
        debug!(list_id, todo_name = name, "INSERT INTO todos (list_id, name) VALUES (?, ?)");
        let result = sqlx::query("INSERT INTO todos (list_id, name) VALUES (?, ?)")
            .bind(list_id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn delete_todo(&self, list_id: i64, todo_id: i64) -> Result<(), sqlx::Error> {
        debug!(list_id, todo_id, "DELETE FROM todos WHERE id = ? AND list_id = ?");
        sqlx::query("DELETE FROM todos WHERE id = ? AND list_id = ?")
            .bind(todo_id)
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_todo_status(
        &self,
        list_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> Result<(), sqlx::Error> {
        debug!(
            list_id,
            todo_id, completed, "UPDATE todos SET completed = ? WHERE id = ? AND list_id = ?"
        );
        sqlx::query("UPDATE todos SET completed = ? WHERE id = ? AND list_id = ?")
            .bind(completed)
            .bind(todo_id)
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn mark_all_completed(&self, list_id: i64) -> Result<(), sqlx::Error> {
        debug!(list_id, "UPDATE todos SET completed = TRUE WHERE list_id = ?");
        sqlx::query("UPDATE todos SET completed = TRUE WHERE list_id = ?")
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_todos_for_list(&self, list_id: i64) -> Result<Vec<Todo>, sqlx::Error> {
        debug!(list_id, "SELECT id, name, completed, list_id FROM todos WHERE list_id = ?");
        sqlx::query_as(
            "SELECT id, name, completed, list_id FROM todos WHERE list_id = ? ORDER BY id",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
    }
}
