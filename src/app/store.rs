use anyhow::Result;
use async_trait::async_trait;

use crate::domain::comment::{Comment, CommentDraft};
use crate::domain::post::{Post, PostSummary};

/// Read-only access to the content store. Carries no credentials and may be
/// served from the store's CDN edge.
#[async_trait]
pub trait ContentReader: Send + Sync {
    /// Number of documents whose id equals `post_id`. The post exists iff
    /// the count is greater than zero. A transport or query failure is an
    /// error, not a zero count.
    async fn post_count(&self, post_id: &str) -> Result<u64>;

    /// All posts, newest first by publish date.
    async fn list_posts(&self) -> Result<Vec<PostSummary>>;

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// Comments on the given post with `approved == true`, oldest first.
    async fn approved_comments(&self, post_id: &str) -> Result<Vec<Comment>>;

    /// Cheap probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Privileged write access to the content store. The only operation is the
/// unapproved-comment create; approval cannot be expressed through this
/// interface.
#[async_trait]
pub trait CommentWriter: Send + Sync {
    async fn create_unapproved(&self, draft: &CommentDraft) -> Result<()>;
}
