use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::comments::CommentService;
use crate::app::posts::PostService;
use crate::domain::comment::{Comment, CommentDraft};
use crate::domain::post::{Post, PostSummary};
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.reader.ping().await.is_ok();
    let status = if store { "ok" } else { "degraded" };

    Json(HealthResponse { status })
}

/// All three fields are optional at the deserialization layer so an absent
/// key and an empty string are rejected the same way. Unknown keys (an
/// `approved` field in particular) are dropped by serde; the draft handed
/// to the gate cannot carry them.
#[derive(Deserialize)]
pub struct SubmitCommentRequest {
    pub post: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
}

pub async fn submit_comment(
    State(state): State<AppState>,
    Json(payload): Json<SubmitCommentRequest>,
) -> Result<(StatusCode, &'static str), AppError> {
    let post = payload.post.unwrap_or_default();
    let name = payload.name.unwrap_or_default();
    let comment = payload.comment.unwrap_or_default();

    if post.is_empty() || name.is_empty() || comment.is_empty() {
        return Err(AppError::bad_request("Missing fields"));
    }

    let service = CommentService::new(state.reader.clone(), state.writer.clone());
    let accepted = service
        .submit(CommentDraft {
            post_id: post.clone(),
            name,
            comment,
        })
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %post, "failed to submit comment");
            AppError::internal("Error submitting comment")
        })?;

    if !accepted {
        tracing::warn!(post_id = %post, "comment submitted for a post that does not exist");
        return Err(AppError::unauthorized("Invalid post"));
    }

    tracing::info!(post_id = %post, "comment submitted for approval");
    Ok((StatusCode::OK, "Comment submitted for approval!"))
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    let service = PostService::new(state.reader.clone());
    let posts = service.list().await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list posts");
        AppError::internal("Error fetching posts")
    })?;

    Ok(Json(posts))
}

pub async fn get_post(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let service = PostService::new(state.reader.clone());
    let post = service.by_slug(&slug).await.map_err(|err| {
        tracing::error!(error = ?err, slug = %slug, "failed to fetch post");
        AppError::internal("Error fetching post")
    })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found("Post not found")),
    }
}

pub async fn list_post_comments(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let posts = PostService::new(state.reader.clone());
    let post = posts.by_slug(&slug).await.map_err(|err| {
        tracing::error!(error = ?err, slug = %slug, "failed to fetch post");
        AppError::internal("Error fetching comments")
    })?;

    let Some(post) = post else {
        return Err(AppError::not_found("Post not found"));
    };

    let service = CommentService::new(state.reader.clone(), state.writer.clone());
    let comments = service.approved_for_post(&post.id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %post.id, "failed to list comments");
        AppError::internal("Error fetching comments")
    })?;

    Ok(Json(comments))
}
