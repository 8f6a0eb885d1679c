//! List handlers: index, create, show, rename and delete

use super::Reply;
use crate::TodoApp;
use crate::error::AppResult;
use crate::flash::Flash;
use crate::storage::is_unique_violation;
use crate::todo::{self, List, ListSummary};
use crate::validation::{self, ValidationError};
use tracing::info;

impl TodoApp {
    /// Shows every list, incomplete lists first, each group sorted by name.
    pub async fn handle_show_lists(&self, flash: Option<Flash>) -> AppResult<Reply> {
        let lists = self.storage.all_lists().await?;
        let summaries: Vec<ListSummary> = todo::sort_items(lists, todo::is_list_completed)
            .iter()
            .map(|list| list.summary())
            .collect();

        let html = self.templates.render_lists(&summaries, flash.as_ref())?;
        Ok(Reply::page(html, flash.as_ref()))
    }

    pub async fn handle_new_list(&self, flash: Option<Flash>) -> AppResult<Reply> {
        let html = self.templates.render_new_list(flash.as_ref(), None)?;
        Ok(Reply::page(html, flash.as_ref()))
    }

    /// Creates a list after checking its name is unique and of valid length.
    ///
    /// A rejected name re-renders the form with the error and the input;
    /// nothing is stored.
    pub async fn handle_create_list(&self, list_name: &str) -> AppResult<Reply> {
        let name = list_name.trim();
        let lists = self.storage.all_lists().await?;

        if let Err(error) = validation::validate_list_name(name, &lists) {
            return self.reject_new_list(name, error);
        }
        self.store_new_list(name).await
    }

    /// Inserts an already validated list name.
    ///
    /// Another request can take the name after validation; the `UNIQUE`
    /// constraint then rejects it the same way validation would.
    pub(crate) async fn store_new_list(&self, name: &str) -> AppResult<Reply> {
        match self.storage.create_list(name).await {
            Ok(list_id) => {
                info!(list_id, "List created");
                Ok(Reply::redirect("/lists", "The list has been created."))
            }
            Err(error) if is_unique_violation(&error) => {
                info!(list_name = name, "List name taken concurrently");
                self.reject_new_list(name, ValidationError::DuplicateName)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn reject_new_list(&self, name: &str, error: ValidationError) -> AppResult<Reply> {
        let flash = Flash::error(error.to_string());
        let html = self.templates.render_new_list(Some(&flash), Some(name))?;
        Ok(Reply::rejected(html))
    }

    /// Shows one list with its todos, incomplete todos first.
    pub async fn handle_show_list(&self, list_id: i64, flash: Option<Flash>) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        let todos = todo::sort_items(list.todos.clone(), todo::is_todo_completed);

        let html = self
            .templates
            .render_list(&list, &todos, flash.as_ref(), None)?;
        Ok(Reply::page(html, flash.as_ref()))
    }

    pub async fn handle_edit_list(&self, list_id: i64, flash: Option<Flash>) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        let html = self
            .templates
            .render_edit_list(&list, flash.as_ref(), None)?;
        Ok(Reply::page(html, flash.as_ref()))
    }

    /// Renames a list.
    ///
    /// The new name must not collide with any other list; keeping the
    /// current name is allowed.
    pub async fn handle_update_list(&self, list_id: i64, list_name: &str) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        let name = list_name.trim();
        let lists = self.storage.all_lists().await?;
        let others = lists.iter().filter(|other| other.id != list_id);

        if let Err(error) = validation::validate_list_name(name, others) {
            return self.reject_renamed_list(&list, name, error);
        }
        self.store_renamed_list(&list, name).await
    }

    pub(crate) async fn store_renamed_list(&self, list: &List, name: &str) -> AppResult<Reply> {
        match self.storage.rename_list(list.id, name).await {
            Ok(()) => {
                info!(list_id = list.id, "List renamed");
                Ok(Reply::redirect("/lists", "The list has been updated."))
            }
            Err(error) if is_unique_violation(&error) => {
                info!(list_id = list.id, list_name = name, "List name taken concurrently");
                self.reject_renamed_list(list, name, ValidationError::DuplicateName)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn reject_renamed_list(
        &self,
        list: &List,
        name: &str,
        error: ValidationError,
    ) -> AppResult<Reply> {
        let flash = Flash::error(error.to_string());
        let html = self
            .templates
            .render_edit_list(list, Some(&flash), Some(name))?;
        Ok(Reply::rejected(html))
    }

    /// Deletes a list and all of its todos.
    pub async fn handle_delete_list(&self, list_id: i64) -> AppResult<Reply> {
        let list = self.require_list(list_id).await?;
        self.storage.delete_list(list.id).await?;
        info!(list_id, todos = list.todos.len(), "List deleted");
        Ok(Reply::redirect("/lists", "The list has been deleted."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn test_app() -> TodoApp {
        TodoApp::in_memory().await.unwrap()
    }

    fn page_html(reply: &Reply) -> &str {
        match reply {
            Reply::Page { html, .. } => html,
            Reply::Redirect { .. } => panic!("expected a page, got {:?}", reply),
        }
    }

    #[tokio::test]
    async fn test_create_list_trims_and_redirects() {
        let app = test_app().await;

        let reply = app.handle_create_list("  Groceries  ").await.unwrap();
        assert_eq!(
            reply,
            Reply::Redirect {
                location: "/lists".to_string(),
                flash: Some(Flash::success("The list has been created.")),
            }
        );

        let lists = app.storage().all_lists().await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Groceries");
    }

    #[tokio::test]
    async fn test_create_duplicate_list_is_rejected() {
        let app = test_app().await;
        app.handle_create_list("Groceries").await.unwrap();

        let reply = app.handle_create_list("Groceries").await.unwrap();
        match &reply {
            Reply::Page { status, .. } => assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY),
            other => panic!("expected a page, got {:?}", other),
        }
        assert!(page_html(&reply).contains("The list name must be unique."));
        assert_eq!(app.storage().all_lists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_blank_list_is_rejected() {
        let app = test_app().await;

        let reply = app.handle_create_list("   ").await.unwrap();
        assert!(page_html(&reply).contains("The list name must be between 1 and 100 characters"));
        assert!(app.storage().all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_list_keeps_own_name() {
        let app = test_app().await;
        let list_id = app.storage().create_list("Work").await.unwrap();

        let reply = app.handle_update_list(list_id, "Work").await.unwrap();
        assert!(matches!(reply, Reply::Redirect { .. }));
    }

    #[tokio::test]
    async fn test_update_list_rejects_other_lists_name() {
        let app = test_app().await;
        let list_id = app.storage().create_list("Work").await.unwrap();
        app.storage().create_list("Home").await.unwrap();

        let reply = app.handle_update_list(list_id, "Home").await.unwrap();
        let html = page_html(&reply);
        assert!(html.contains("The list name must be unique."));
        assert!(html.contains("value=\"Home\""));

        let list = app.storage().find_list(list_id).await.unwrap().unwrap();
        assert_eq!(list.name, "Work");
    }

    // A name taken between validation and insert is rejected like a duplicate
    #[tokio::test]
    async fn test_store_new_list_with_taken_name_is_rejected() {
        let app = test_app().await;
        app.storage().create_list("Groceries").await.unwrap();

        let reply = app.store_new_list("Groceries").await.unwrap();
        match &reply {
            Reply::Page { status, .. } => assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY),
            other => panic!("expected a page, got {:?}", other),
        }
        let html = page_html(&reply);
        assert!(html.contains("The list name must be unique."));
        assert!(html.contains("value=\"Groceries\""));
        assert_eq!(app.storage().all_lists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_renamed_list_with_taken_name_is_rejected() {
        let app = test_app().await;
        let list_id = app.storage().create_list("Work").await.unwrap();
        app.storage().create_list("Home").await.unwrap();
        let list = app.require_list(list_id).await.unwrap();

        let reply = app.store_renamed_list(&list, "Home").await.unwrap();
        match &reply {
            Reply::Page { status, .. } => assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY),
            other => panic!("expected a page, got {:?}", other),
        }
        assert!(page_html(&reply).contains("The list name must be unique."));

        let list = app.storage().find_list(list_id).await.unwrap().unwrap();
        assert_eq!(list.name, "Work");
    }

    #[tokio::test]
    async fn test_show_lists_orders_incomplete_first() {
        let app = test_app().await;
        let done = app.storage().create_list("a").await.unwrap();
        let todo_id = app.storage().create_todo(done, "only").await.unwrap();
        app.storage().set_todo_status(done, todo_id, true).await.unwrap();
        app.storage().create_list("B").await.unwrap();

        let reply = app.handle_show_lists(None).await.unwrap();
        let html = page_html(&reply);
        let b = html.find("<h2>B</h2>").unwrap();
        let a = html.find("<h2>a</h2>").unwrap();
        assert!(b < a);
    }

    #[tokio::test]
    async fn test_missing_list_is_not_found() {
        let app = test_app().await;

        for result in [
            app.handle_show_list(42, None).await,
            app.handle_edit_list(42, None).await,
            app.handle_update_list(42, "x").await,
            app.handle_delete_list(42).await,
        ] {
            assert!(matches!(
                result,
                Err(crate::error::AppError::NotFound("List not found"))
            ));
        }
    }
}
