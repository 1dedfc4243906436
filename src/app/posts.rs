use std::sync::Arc;

use anyhow::Result;

use crate::app::store::ContentReader;
use crate::domain::post::{Post, PostSummary};

#[derive(Clone)]
pub struct PostService {
    reader: Arc<dyn ContentReader>,
}

impl PostService {
    pub fn new(reader: Arc<dyn ContentReader>) -> Self {
        Self { reader }
    }

    pub async fn list(&self) -> Result<Vec<PostSummary>> {
        self.reader.list_posts().await
    }

    pub async fn by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.reader.post_by_slug(slug).await
    }
}
