//! News article records and request shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A published article. `body` holds HTML produced by the admin editor.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
    /// Epoch milliseconds, assigned once at creation.
    pub created_at: i64,
    /// Epoch milliseconds of the last mutation, NULL until first update.
    pub updated_at: Option<i64>,
}

/// Body for `POST /api/admin/news`.
///
/// Title and body are optional here so the service can reject an empty string
/// the same way as a missing field.
#[derive(Deserialize, Debug, Default)]
pub struct CreateNews {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
}

/// Body for `PATCH /api/admin/news/{id}`.
///
/// Every field falls back independently to its stored value when the incoming
/// value is null or missing.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
}
