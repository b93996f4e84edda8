//! Data models for the content API.
//!
//! Row structs map to the SQLite tables via `sqlx::FromRow`; request and
//! response shapes serialize naturally as JSON via `serde`.

pub mod image;
pub mod meta;
pub mod news;
pub mod patch;
