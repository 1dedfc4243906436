use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A comment as read back from the content store. The read path only ever
/// returns comments with `approved == true`, so the flag is not part of the
/// read shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Write-side input to the submission gate.
///
/// Deliberately has no approval field: an approved comment is not
/// representable here, only the editorial tooling flips the flag later.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub post_id: String,
    pub name: String,
    pub comment: String,
}
