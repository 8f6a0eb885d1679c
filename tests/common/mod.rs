//! Common test utilities for integration tests
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use todo_lists::TodoApp;
use todo_lists::routes::create_router;
use tower::ServiceExt;

/// Create an application backed by a fresh in-memory database
pub async fn get_test_app() -> TodoApp {
    TodoApp::in_memory().await.unwrap()
}

/// Create an application and a router serving it
pub async fn get_test_router() -> (TodoApp, Router) {
    let app = get_test_app().await;
    let router = create_router(app.clone());
    (app, router)
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// GET request carrying the `name=value` pair of a `Set-Cookie` header
pub fn get_with_cookie(uri: &str, set_cookie: &str) -> Request<Body> {
    let pair = set_cookie.split(';').next().unwrap();
    Request::builder()
        .uri(uri)
        .header(COOKIE, pair)
        .body(Body::empty())
        .unwrap()
}

/// POST request with an urlencoded form body, e.g. `"list_name=Groceries"`
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string())
}
