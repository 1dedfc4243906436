use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Post projection for the listing endpoint. The main image is whatever
/// asset object the store holds; it is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<Value>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

/// Full post as served by the detail endpoint. `body` is the store's
/// rich-text block array, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<Value>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}
