use std::sync::Arc;

use anyhow::Result;

use crate::app::store::{CommentWriter, ContentReader};
use crate::domain::comment::{Comment, CommentDraft};

#[derive(Clone)]
pub struct CommentService {
    reader: Arc<dyn ContentReader>,
    writer: Arc<dyn CommentWriter>,
}

impl CommentService {
    pub fn new(reader: Arc<dyn ContentReader>, writer: Arc<dyn CommentWriter>) -> Self {
        Self { reader, writer }
    }

    /// The submission gate: verify the target post exists, then persist the
    /// draft through the privileged client. Returns `Ok(false)` when the
    /// post id matches nothing; nothing is written in that case.
    ///
    /// The existence check and the write are two separate store calls with
    /// no transaction spanning them. A post deleted in between leaves an
    /// orphaned unapproved comment, which moderation never approves.
    pub async fn submit(&self, draft: CommentDraft) -> Result<bool> {
        let count = self.reader.post_count(&draft.post_id).await?;
        if count == 0 {
            return Ok(false);
        }

        self.writer.create_unapproved(&draft).await?;
        Ok(true)
    }

    pub async fn approved_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.reader.approved_comments(post_id).await
    }
}
