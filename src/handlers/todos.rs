//! Todo handlers: create, toggle, delete and complete all

use super::{Reply, list_path, require_todo};
use crate::TodoApp;
use crate::error::AppResult;
use crate::flash::Flash;
use crate::todo;
use crate::validation;
use tracing::info;

impl TodoApp {
    /// Adds a todo to a list.
    ///
    /// A rejected name re-renders the list page with the error and the input.
    pub async fn handle_create_todo(&self, list_id: i64, todo_name: &str) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        let name = todo_name.trim();

        if let Err(error) = validation::validate_todo_name(name) {
            let flash = Flash::error(error.to_string());
            let todos = todo::sort_items(list.todos.clone(), todo::is_todo_completed);
            let html = self
                .templates
                .render_list(&list, &todos, Some(&flash), Some(name))?;
            return Ok(Reply::rejected(html));
        }

        let todo_id = self.storage.create_todo(list_id, name).await?;
        info!(list_id, todo_id, "Todo added");
        Ok(Reply::redirect(list_path(list_id), "The todo was added."))
    }

    /// Sets a todo's completion flag.
    pub async fn handle_update_todo_status(
        &self,
        list_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        require_todo(&list, todo_id)?;

        self.storage
            .set_todo_status(list_id, todo_id, completed)
            .await?;
        info!(list_id, todo_id, completed, "Todo status updated");
        Ok(Reply::redirect(
            list_path(list_id),
            "The todo has been updated.",
        ))
    }

    pub async fn handle_delete_todo(&self, list_id: i64, todo_id: i64) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        require_todo(&list, todo_id)?;

        self.storage.delete_todo(list_id, todo_id).await?;
        info!(list_id, todo_id, "Todo deleted");
        Ok(Reply::redirect(
            list_path(list_id),
            "The todo has been deleted.",
        ))
    }

    /// Marks every todo of the list as completed.
    pub async fn handle_complete_all(&self, list_id: i64) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;

        self.storage.mark_all_completed(list.id).await?;
        info!(list_id, "All todos completed");
        Ok(Reply::redirect(
            list_path(list_id),
            "All todos have been updated.",
        ))
    }
}
