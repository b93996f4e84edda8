//! Gallery image records and their request/response shapes.

use crate::models::patch::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An image row as stored, `tags` still JSON-encoded.
#[derive(FromRow, Debug, Clone)]
pub struct ImageRow {
    pub id: i64,
    pub url: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub created_at: i64,
}

/// An image as returned by the API, tags decoded to a list.
#[derive(Serialize, Debug, Clone)]
pub struct Image {
    pub id: i64,
    pub url: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Epoch milliseconds, assigned once at creation.
    pub created_at: i64,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: row.id,
            url: row.url,
            name: row.name,
            category: row.category,
            tags: decode_tags(row.tags.as_deref()),
            created_at: row.created_at,
        }
    }
}

/// Decode a stored tag list.
///
/// NULL or empty decodes to an empty list. Stored text that is not a JSON
/// string array degrades to a single tag wrapping the raw value instead of
/// failing the whole read.
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.is_empty() {
        return Vec::new();
    }
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_else(|_| vec![raw.to_string()])
}

/// Body for `POST /api/admin/images`.
#[derive(Deserialize, Debug)]
pub struct CreateImage {
    pub url: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body for `PATCH /api/admin/images/{id}`.
///
/// Fields left out of the request keep their stored value; fields present in
/// the request overwrite it, an explicit `null` included.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateImage {
    #[serde(default)]
    pub url: Patch<String>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub category: Patch<String>,
    #[serde(default)]
    pub tags: Patch<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_tags_handles_missing_and_empty() {
        assert!(decode_tags(None).is_empty());
        assert!(decode_tags(Some("")).is_empty());
        assert!(decode_tags(Some("[]")).is_empty());
    }

    #[test]
    fn decode_tags_preserves_order() {
        assert_eq!(
            decode_tags(Some(r#"["a","b"]"#)),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn decode_tags_wraps_malformed_value() {
        assert_eq!(decode_tags(Some("oops")), vec!["oops".to_string()]);
        assert_eq!(decode_tags(Some("[1,2]")), vec!["[1,2]".to_string()]);
    }

    #[test]
    fn update_body_distinguishes_null_from_absent() {
        let body: UpdateImage = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(body.name, Patch::Set(None));
        assert_eq!(body.tags, Patch::Absent);
        assert_eq!(body.url, Patch::Absent);
    }
}
