//! Site-wide metadata singletons: the known categories and the tag shortlist.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound on the stored tag shortlist.
pub const MAX_META_TAGS: usize = 5;

/// The two metadata singletons exposed at `/api/meta`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SiteMeta {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Body for `PATCH /api/admin/meta`. A missing sequence is treated as empty.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateMeta {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UpdateMeta {
    /// Normalize into the stored form: both lists de-duplicated preserving
    /// first-seen order, tags capped at [`MAX_META_TAGS`] entries.
    pub fn normalize(self) -> SiteMeta {
        let mut tags = dedup(self.tags);
        tags.truncate(MAX_META_TAGS);
        SiteMeta {
            categories: dedup(self.categories),
            tags,
        }
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn normalize_dedups_preserving_order() {
        let meta = UpdateMeta {
            categories: strings(&["lab", "field", "lab", "press"]),
            tags: strings(&["a", "a", "b"]),
        }
        .normalize();
        assert_eq!(meta.categories, strings(&["lab", "field", "press"]));
        assert_eq!(meta.tags, strings(&["a", "b"]));
    }

    #[test]
    fn normalize_caps_tags_after_dedup() {
        let meta = UpdateMeta {
            categories: Vec::new(),
            tags: strings(&["x", "x", "y", "z", "w", "v", "u"]),
        }
        .normalize();
        assert_eq!(meta.tags, strings(&["x", "y", "z", "w", "v"]));
    }

    #[test]
    fn missing_sequences_default_to_empty() {
        let body: UpdateMeta = serde_json::from_str("{}").unwrap();
        let meta = body.normalize();
        assert_eq!(meta, SiteMeta::default());
    }
}
