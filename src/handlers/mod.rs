//! Request handlers for the todo list application
//!
//! Each handler runs the same pipeline: guard that the addressed records
//! exist, validate input, call [`Storage`](crate::Storage), then order the
//! result for display. Handlers for lists and for todos live in separate
//! files.

pub mod lists;
pub mod todos;

use crate::TodoApp;
use crate::error::{AppError, AppResult};
use crate::flash::{CLEAR_FLASH_COOKIE, Flash};
use crate::todo::{List, Todo, find_todo_by_id};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

/// What a handler answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A rendered page
    ///
    /// `clear_flash` is set when the page displayed a flash message read
    /// from the request's cookie.
    Page {
        status: StatusCode,
        html: String,
        clear_flash: bool,
    },
    /// A `303 See Other`, optionally leaving a flash message for the next page
    Redirect {
        location: String,
        flash: Option<Flash>,
    },
}

impl Reply {
    pub(crate) fn page(html: String, shown_flash: Option<&Flash>) -> Self {
        Reply::Page {
            status: StatusCode::OK,
            html,
            clear_flash: shown_flash.is_some(),
        }
    }

    /// The form page shown again after its input was rejected
    pub(crate) fn rejected(html: String) -> Self {
        Reply::Page {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            html,
            clear_flash: false,
        }
    }

    /// Expire the request's `flash` cookie even if the page did not show it
    pub fn expire_flash(self) -> Self {
        match self {
            Reply::Page { status, html, .. } => Reply::Page {
                status,
                html,
                clear_flash: true,
            },
            redirect => redirect,
        }
    }

    pub(crate) fn redirect(location: impl Into<String>, message: &str) -> Self {
        Reply::Redirect {
            location: location.into(),
            flash: Some(Flash::success(message)),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Page {
                status,
                html,
                clear_flash,
            } => {
                let mut response = (status, Html(html)).into_response();
                if clear_flash {
                    response
                        .headers_mut()
                        .append(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH_COOKIE));
                }
                response
            }
            Reply::Redirect { location, flash } => {
                let mut response = Redirect::to(&location).into_response();
                if let Some(cookie) = flash
                    .map(|flash| flash.to_set_cookie())
                    .and_then(|cookie| HeaderValue::from_str(&cookie).ok())
                {
                    response.headers_mut().append(SET_COOKIE, cookie);
                }
                response
            }
        }
    }
}

pub(crate) fn list_path(list_id: i64) -> String {
    format!("/lists/{}", list_id)
}

impl TodoApp {
    /// Load the list addressed by the request
    ///
    /// # Returns
    /// The list with its todos, or `AppError::NotFound` if it does not exist
    pub async fn require_list(&self, list_id: i64) -> AppResult<List> {
        self.storage
            .find_list(list_id)
            .await?
            .ok_or(AppError::NotFound("List not found"))
    }
}

/// Find the todo addressed by the request within an already loaded list
pub fn require_todo(list: &List, todo_id: i64) -> AppResult<&Todo> {
    find_todo_by_id(todo_id, &list.todos).ok_or(AppError::NotFound("Todo not found"))
}
