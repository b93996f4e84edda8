//! Presence-aware optional fields for partial updates.

use serde::{Deserialize, Deserializer};

/// A request field that distinguishes "absent" from "explicitly null".
///
/// With `#[serde(default)]` an omitted field stays [`Patch::Absent`]; a field
/// that is present deserializes to `Set(None)` for JSON `null` and
/// `Set(Some(value))` otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Set(Option<T>),
}

impl<T> Patch<T> {
    /// Resolve against the stored value: absent keeps it, set replaces it.
    pub fn resolve(self, stored: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => stored,
            Patch::Set(value) => value,
        }
    }

    /// Resolve for a NOT NULL column: an explicit null also keeps the stored
    /// value, since there is nothing valid to write.
    pub fn resolve_required(self, stored: T) -> T {
        match self {
            Patch::Set(Some(value)) => value,
            _ => stored,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Default)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn omitted_field_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, Patch::Absent);
    }

    #[test]
    fn null_field_is_set_to_none() {
        let body: Body = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(body.name, Patch::Set(None));
    }

    #[test]
    fn value_field_is_set() {
        let body: Body = serde_json::from_str(r#"{"name":"hero"}"#).unwrap();
        assert_eq!(body.name, Patch::Set(Some("hero".to_string())));
    }

    #[test]
    fn resolve_keeps_stored_only_when_absent() {
        let stored = Some("old".to_string());
        assert_eq!(Patch::Absent.resolve(stored.clone()), stored);
        assert_eq!(Patch::Set(None).resolve(stored.clone()), None);
        assert_eq!(
            Patch::Set(Some("new".to_string())).resolve(stored),
            Some("new".to_string())
        );
    }

    #[test]
    fn resolve_required_ignores_explicit_null() {
        assert_eq!(
            Patch::<String>::Set(None).resolve_required("kept".to_string()),
            "kept"
        );
        assert_eq!(
            Patch::Set(Some("new".to_string())).resolve_required("old".to_string()),
            "new"
        );
    }
}
