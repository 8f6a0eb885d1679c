//! HTTP routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | / | redirect to /lists |
//! | GET | /lists | `handle_show_lists` |
//! | POST | /lists | `handle_create_list` |
//! | GET | /lists/new | `handle_new_list` |
//! | GET | /lists/{list_id} | `handle_show_list` |
//! | POST | /lists/{list_id} | `handle_update_list` |
//! | GET | /lists/{list_id}/edit | `handle_edit_list` |
//! | POST | /lists/{list_id}/delete | `handle_delete_list` |
//! | POST | /lists/{list_id}/complete_all | `handle_complete_all` |
//! | POST | /lists/{list_id}/todos | `handle_create_todo` |
//! | POST | /lists/{list_id}/todos/{todo_id}/toggle | `handle_update_todo_status` |
//! | POST | /lists/{list_id}/todos/{todo_id}/delete | `handle_delete_todo` |
//!
//! Functions here only decode the request (path, form body, flash cookie)
//! and hand over to the matching `TodoApp` handler.

use crate::TodoApp;
use crate::error::{AppError, AppResult};
use crate::flash::Flash;
use crate::handlers::Reply;
use axum::Router;
use axum::extract::{Form, FromRequestParts, Path, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum::routing::{get, post};
use serde::Deserialize;

/// `{list_id}` path segment
///
/// A segment that is not an integer can never name a list, so it is
/// answered with the same 404 as an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ListId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(list_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("List not found"))?;
        parse_id(&list_id, "List not found").map(ListId)
    }
}

/// `{list_id}/todos/{todo_id}` path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoPath {
    pub list_id: i64,
    pub todo_id: i64,
}

impl<S: Send + Sync> FromRequestParts<S> for TodoPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((list_id, todo_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("List not found"))?;
        Ok(TodoPath {
            list_id: parse_id(&list_id, "List not found")?,
            todo_id: parse_id(&todo_id, "Todo not found")?,
        })
    }
}

fn parse_id(segment: &str, not_found: &'static str) -> AppResult<i64> {
    segment.parse().map_err(|_| AppError::NotFound(not_found))
}

#[derive(Debug, Deserialize)]
pub struct ListForm {
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub todo: String,
}

/// Body of the toggle form; `completed` is the new state, `"True"` or `"False"`
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub completed: String,
}

impl StatusForm {
    pub fn is_completed(&self) -> bool {
        self.completed.eq_ignore_ascii_case("true")
    }
}

pub fn create_router(app: TodoApp) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/lists", get(show_lists).post(create_list))
        .route("/lists/new", get(new_list))
        .route("/lists/{list_id}", get(show_list).post(update_list))
        .route("/lists/{list_id}/edit", get(edit_list))
        .route("/lists/{list_id}/delete", post(delete_list))
        .route("/lists/{list_id}/complete_all", post(complete_all))
        .route("/lists/{list_id}/todos", post(create_todo))
        .route(
            "/lists/{list_id}/todos/{todo_id}/toggle",
            post(update_todo_status),
        )
        .route("/lists/{list_id}/todos/{todo_id}/delete", post(delete_todo))
        .with_state(app)
}

/// Pages expire any `flash` cookie they receive, including one that did not decode
fn expire_pending_flash(headers: &HeaderMap, reply: AppResult<Reply>) -> AppResult<Reply> {
    if Flash::is_pending(headers) {
        reply.map(Reply::expire_flash)
    } else {
        reply
    }
}

async fn index() -> Redirect {
    Redirect::to("/lists")
}

async fn show_lists(State(app): State<TodoApp>, headers: HeaderMap) -> AppResult<Reply> {
    let reply = app.handle_show_lists(Flash::from_headers(&headers)).await;
    expire_pending_flash(&headers, reply)
}

async fn new_list(State(app): State<TodoApp>, headers: HeaderMap) -> AppResult<Reply> {
    let reply = app.handle_new_list(Flash::from_headers(&headers)).await;
    expire_pending_flash(&headers, reply)
}

async fn create_list(State(app): State<TodoApp>, Form(form): Form<ListForm>) -> AppResult<Reply> {
    app.handle_create_list(&form.list_name).await
}

async fn show_list(
    State(app): State<TodoApp>,
    ListId(list_id): ListId,
    headers: HeaderMap,
) -> AppResult<Reply> {
    let reply = app
        .handle_show_list(list_id, Flash::from_headers(&headers))
        .await;
    expire_pending_flash(&headers, reply)
}

async fn edit_list(
    State(app): State<TodoApp>,
    ListId(list_id): ListId,
    headers: HeaderMap,
) -> AppResult<Reply> {
    let reply = app
        .handle_edit_list(list_id, Flash::from_headers(&headers))
        .await;
    expire_pending_flash(&headers, reply)
}

async fn update_list(
    State(app): State<TodoApp>,
    ListId(list_id): ListId,
    Form(form): Form<ListForm>,
) -> AppResult<Reply> {
    app.handle_update_list(list_id, &form.list_name).await
}

async fn delete_list(State(app): State<TodoApp>, ListId(list_id): ListId) -> AppResult<Reply> {
    app.handle_delete_list(list_id).await
}

async fn complete_all(State(app): State<TodoApp>, ListId(list_id): ListId) -> AppResult<Reply> {
    app.handle_complete_all(list_id).await
}

async fn create_todo(
    State(app): State<TodoApp>,
    ListId(list_id): ListId,
    Form(form): Form<TodoForm>,
) -> AppResult<Reply> {
    app.handle_create_todo(list_id, &form.todo).await
}

async fn update_todo_status(
    State(app): State<TodoApp>,
    TodoPath { list_id, todo_id }: TodoPath,
    Form(form): Form<StatusForm>,
) -> AppResult<Reply> {
    app.handle_update_todo_status(list_id, todo_id, form.is_completed())
        .await
}

async fn delete_todo(
    State(app): State<TodoApp>,
    TodoPath { list_id, todo_id }: TodoPath,
) -> AppResult<Reply> {
    app.handle_delete_todo(list_id, todo_id).await
}
