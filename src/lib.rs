pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use std::sync::Arc;

use crate::app::store::{CommentWriter, ContentReader};

/// Shared request state: the two content-store capabilities.
///
/// The privileged write capability is only reachable through `writer`;
/// nothing on the read path holds it.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn ContentReader>,
    pub writer: Arc<dyn CommentWriter>,
}
