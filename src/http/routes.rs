use axum::{routing::get, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/:slug", get(handlers::get_post))
        .route("/api/posts/:slug/comments", get(handlers::list_post_comments))
}

pub fn comments() -> Router<AppState> {
    Router::new().route("/api/submit-comment", post(handlers::submit_comment))
}
