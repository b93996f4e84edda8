//! Shared per-process state handed to every handler.

use crate::{broadcast::ChangeFeed, services::content_service::ContentService};

/// Cloneable handle bundling the store service and the change feed.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentService,
    pub events: ChangeFeed,
}
