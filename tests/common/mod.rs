#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use gatehouse::app::store::{CommentWriter, ContentReader};
use gatehouse::domain::comment::{Comment, CommentDraft};
use gatehouse::domain::post::{Post, PostSummary};
use gatehouse::AppState;

// ---------------------------------------------------------------------------
// FakeStore — in-memory stand-in for the content store
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct StoredPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub published_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct StoredComment {
    pub post_id: String,
    pub name: String,
    pub comment: String,
    pub approved: bool,
    pub created_at: OffsetDateTime,
}

/// Implements both capability traits so one instance can be handed to the
/// app as reader and writer. Call counters let tests assert exactly how
/// often each path touched the store; the failure toggles simulate outages.
#[derive(Default)]
pub struct FakeStore {
    posts: Mutex<Vec<StoredPost>>,
    comments: Mutex<Vec<StoredComment>>,
    read_calls: AtomicUsize,
    write_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    clock: AtomicUsize,
}

impl FakeStore {
    /// Monotonic fake timestamps so ordering assertions are deterministic.
    fn next_instant(&self) -> OffsetDateTime {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst) as i64;
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(tick)
    }

    pub fn seed_post(&self, id: &str, title: &str, slug: &str) {
        let published_at = self.next_instant();
        self.seed_post_at(id, title, slug, published_at);
    }

    pub fn seed_post_at(
        &self,
        id: &str,
        title: &str,
        slug: &str,
        published_at: OffsetDateTime,
    ) {
        self.posts.lock().unwrap().push(StoredPost {
            id: id.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            published_at,
        });
    }

    pub fn seed_comment(&self, post_id: &str, name: &str, comment: &str, approved: bool) {
        self.comments.lock().unwrap().push(StoredComment {
            post_id: post_id.to_string(),
            name: name.to_string(),
            comment: comment.to_string(),
            approved,
            created_at: self.next_instant(),
        });
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn comments(&self) -> Vec<StoredComment> {
        self.comments.lock().unwrap().clone()
    }

    pub fn read_call_count(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn write_call_count(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<()> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated read outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentReader for FakeStore {
    async fn post_count(&self, post_id: &str) -> Result<u64> {
        self.check_read()?;
        let count = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|post| post.id == post_id)
            .count();
        Ok(count as u64)
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        self.check_read()?;
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts
            .into_iter()
            .map(|post| PostSummary {
                id: post.id,
                title: post.title,
                slug: post.slug,
                main_image: None,
                published_at: Some(post.published_at),
            })
            .collect())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.check_read()?;
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|post| post.slug == slug).map(|post| Post {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            main_image: None,
            published_at: Some(post.published_at),
            body: None,
        }))
    }

    async fn approved_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.check_read()?;
        let mut comments: Vec<StoredComment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|comment| comment.post_id == post_id && comment.approved)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments
            .into_iter()
            .enumerate()
            .map(|(index, comment)| Comment {
                id: format!("comment-{}", index),
                name: comment.name,
                comment: comment.comment,
                created_at: comment.created_at,
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.check_read()
    }
}

#[async_trait]
impl CommentWriter for FakeStore {
    async fn create_unapproved(&self, draft: &CommentDraft) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated write outage"));
        }
        self.comments.lock().unwrap().push(StoredComment {
            post_id: draft.post_id.clone(),
            name: draft.name.clone(),
            comment: draft.comment.clone(),
            approved: false,
            created_at: self.next_instant(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TestApp — router over a fresh FakeStore per test
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub store: Arc<FakeStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body_bytes).to_string()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(FakeStore::default());
        let state = AppState {
            reader: store.clone(),
            writer: store.clone(),
        };
        let router = gatehouse::http::router(state);

        TestApp { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }
}
