//! src/services/content_service.rs
//!
//! ContentService — CRUD over the gallery, news, and site-metadata tables,
//! plus management of the upload directory. SQLite holds all durable state;
//! uploaded payloads live on local disk beneath the served static root and
//! are addressed publicly at `/static/uploads/{filename}`.

use crate::models::{
    image::{CreateImage, Image, ImageRow, UpdateImage},
    meta::SiteMeta,
    news::{CreateNews, NewsArticle, UpdateNews},
    patch::Patch,
};
use bytes::Bytes;
use chrono::Utc;
use sqlx::SqlitePool;
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Public URL prefix under which uploaded files are served.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads/";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("image {0} not found")]
    ImageNotFound(i64),
    #[error("news article {0} not found")]
    NewsNotFound(i64),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type ContentResult<T> = Result<T, ContentError>;

/// ContentService provides the store operations behind the HTTP surface:
/// - Image CRUD with tags held as a JSON-encoded column
/// - News article CRUD with nullish-fallback partial updates
/// - The `categories`/`tags` metadata singletons
/// - Writing uploaded files under a collision-avoided name
///
/// Handlers are stateless; every method is a short independent statement or a
/// read-then-write pair against the shared pool.
#[derive(Clone)]
pub struct ContentService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,

    /// Directory on disk where uploaded files are written.
    pub upload_dir: PathBuf,
}

impl ContentService {
    /// Create a new ContentService backed by the provided SQLite pool and
    /// writing uploads beneath `upload_dir`.
    pub fn new(db: Arc<SqlitePool>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            upload_dir: upload_dir.into(),
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    // -- Images --

    /// All images, newest first, tags decoded.
    pub async fn list_images(&self) -> ContentResult<Vec<Image>> {
        let rows = sqlx::query_as::<_, ImageRow>(
            "SELECT id, url, name, category, tags, created_at
             FROM images ORDER BY created_at DESC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(rows.into_iter().map(Image::from).collect())
    }

    /// Insert a new image and return its id.
    pub async fn create_image(&self, req: CreateImage) -> ContentResult<i64> {
        let tags = encode_tags(&req.tags.unwrap_or_default());
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO images (url, name, category, tags, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&req.url)
        .bind(&req.name)
        .bind(&req.category)
        .bind(&tags)
        .bind(Self::now_ms())
        .fetch_one(&*self.db)
        .await?;
        Ok(id)
    }

    async fn fetch_image(&self, id: i64) -> ContentResult<Option<ImageRow>> {
        Ok(sqlx::query_as::<_, ImageRow>(
            "SELECT id, url, name, category, tags, created_at FROM images WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?)
    }

    /// Merge a partial update into a stored image.
    ///
    /// Field-presence semantics: a field left out of the request keeps its
    /// stored value, a field present in the request replaces it, explicit
    /// null included. Returns ImageNotFound when the id has no row.
    pub async fn update_image(&self, id: i64, req: UpdateImage) -> ContentResult<()> {
        let row = self
            .fetch_image(id)
            .await?
            .ok_or(ContentError::ImageNotFound(id))?;

        let url = req.url.resolve_required(row.url);
        let name = req.name.resolve(row.name);
        let category = req.category.resolve(row.category);
        let tags = match req.tags {
            Patch::Absent => row.tags,
            Patch::Set(None) => None,
            Patch::Set(Some(list)) => Some(encode_tags(&list)),
        };

        sqlx::query("UPDATE images SET url = ?, name = ?, category = ?, tags = ? WHERE id = ?")
            .bind(&url)
            .bind(&name)
            .bind(&category)
            .bind(&tags)
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(())
    }

    /// Delete an image row, best-effort removing its uploaded file first.
    ///
    /// The delete is unconditional: a missing id is not an error. The row is
    /// read only to learn whether its `url` points at a managed upload; a
    /// failed file removal is logged and swallowed.
    pub async fn delete_image(&self, id: i64) -> ContentResult<()> {
        if let Some(row) = self.fetch_image(id).await? {
            if let Some(file_name) = row.url.strip_prefix(UPLOAD_URL_PREFIX) {
                // uploads are stored flat, so a separator or dot-dot cannot name one
                if !file_name.contains('/') && !file_name.contains("..") {
                    let path = self.upload_dir.join(file_name);
                    match fs::remove_file(&path).await {
                        Ok(_) => debug!("removed upload {}", path.display()),
                        Err(err) => {
                            debug!("could not remove upload {}: {}", path.display(), err)
                        }
                    }
                }
            }
        }

        sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(())
    }

    // -- News --

    /// All articles, newest first.
    pub async fn list_news(&self) -> ContentResult<Vec<NewsArticle>> {
        Ok(sqlx::query_as::<_, NewsArticle>(
            "SELECT id, title, body, excerpt, cover_url, category, created_at, updated_at
             FROM news ORDER BY created_at DESC",
        )
        .fetch_all(&*self.db)
        .await?)
    }

    pub async fn get_news(&self, id: i64) -> ContentResult<NewsArticle> {
        sqlx::query_as::<_, NewsArticle>(
            "SELECT id, title, body, excerpt, cover_url, category, created_at, updated_at
             FROM news WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NewsNotFound(id))
    }

    /// Insert a new article and return its id.
    ///
    /// Title and body must be present and non-empty; `updated_at` stays NULL
    /// until the first update.
    pub async fn create_news(&self, req: CreateNews) -> ContentResult<i64> {
        let title = non_empty(req.title).ok_or(ContentError::MissingField("title"))?;
        let body = non_empty(req.body).ok_or(ContentError::MissingField("body"))?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO news (title, body, excerpt, cover_url, category, created_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&title)
        .bind(&body)
        .bind(&req.excerpt)
        .bind(&req.cover_url)
        .bind(&req.category)
        .bind(Self::now_ms())
        .fetch_one(&*self.db)
        .await?;
        Ok(id)
    }

    /// Merge a partial update into a stored article.
    ///
    /// Nullish-fallback semantics: every null or missing field keeps its
    /// stored value. `updated_at` advances on every call, whether or not a
    /// visible field changed.
    pub async fn update_news(&self, id: i64, req: UpdateNews) -> ContentResult<()> {
        let row = sqlx::query_as::<_, NewsArticle>(
            "SELECT id, title, body, excerpt, cover_url, category, created_at, updated_at
             FROM news WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ContentError::NewsNotFound(id))?;

        sqlx::query(
            "UPDATE news SET title = ?, body = ?, excerpt = ?, cover_url = ?, category = ?,
                             updated_at = ? WHERE id = ?",
        )
        .bind(req.title.unwrap_or(row.title))
        .bind(req.body.unwrap_or(row.body))
        .bind(req.excerpt.or(row.excerpt))
        .bind(req.cover_url.or(row.cover_url))
        .bind(req.category.or(row.category))
        .bind(next_stamp(row.updated_at))
        .bind(id)
        .execute(&*self.db)
        .await?;
        Ok(())
    }

    /// Unconditional delete; a missing id is not an error.
    pub async fn delete_news(&self, id: i64) -> ContentResult<()> {
        sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(())
    }

    // -- Meta --

    /// Read both metadata singletons, defaulting to empty lists when a key is
    /// unset or its stored value does not parse.
    pub async fn get_meta(&self) -> ContentResult<SiteMeta> {
        Ok(SiteMeta {
            categories: self.read_meta_list("categories").await?,
            tags: self.read_meta_list("tags").await?,
        })
    }

    /// Upsert both singletons under their fixed keys.
    pub async fn set_meta(&self, meta: &SiteMeta) -> ContentResult<()> {
        self.write_meta_list("categories", &meta.categories).await?;
        self.write_meta_list("tags", &meta.tags).await
    }

    async fn read_meta_list(&self, key: &str) -> ContentResult<Vec<String>> {
        let raw = sqlx::query_scalar::<_, String>("SELECT value FROM meta WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.db)
            .await?;
        Ok(raw
            .and_then(|value| serde_json::from_str(&value).ok())
            .unwrap_or_default())
    }

    async fn write_meta_list(&self, key: &str, values: &[String]) -> ContentResult<()> {
        sqlx::query(
            "INSERT INTO meta (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(serde_json::json!(values).to_string())
        .execute(&*self.db)
        .await?;
        Ok(())
    }

    // -- Uploads --

    /// Write one uploaded payload into the upload directory.
    ///
    /// The stored name is the slugified original stem plus its extension
    /// (`jpg` when none), suffixed `-1`, `-2`, ... until unused on disk.
    /// Returns the public URL of the stored file.
    pub async fn store_upload(&self, original_name: &str, data: Bytes) -> ContentResult<String> {
        fs::create_dir_all(&self.upload_dir).await?;

        let (stem, ext) = split_file_name(original_name);
        let file_name = self.unused_file_name(&stem, &ext).await?;
        let path = self.upload_dir.join(&file_name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(format!("{}{}", UPLOAD_URL_PREFIX, file_name))
    }

    /// Probe the upload directory for a free `stem.ext` / `stem-N.ext` name.
    async fn unused_file_name(&self, stem: &str, ext: &str) -> ContentResult<String> {
        let mut candidate = format!("{}.{}", stem, ext);
        let mut suffix = 0u32;
        while fs::try_exists(self.upload_dir.join(&candidate)).await? {
            suffix += 1;
            candidate = format!("{}-{}.{}", stem, suffix, ext);
        }
        Ok(candidate)
    }
}

fn encode_tags(tags: &[String]) -> String {
    serde_json::json!(tags).to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Next `updated_at` stamp: wall clock, nudged forward when two updates land
/// inside the same millisecond so the stamp still strictly increases.
fn next_stamp(previous: Option<i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match previous {
        Some(prev) if now <= prev => prev + 1,
        _ => now,
    }
}

/// Split an original filename into a slugified stem and an extension.
fn split_file_name(original: &str) -> (String, String) {
    let path = Path::new(original);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    (slugify(stem), ext)
}

/// Lowercase the stem, collapse runs of characters outside `[a-z0-9_]` into a
/// single hyphen, trim edge hyphens, and fall back to `image` when nothing
/// survives.
fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len());
    let mut pending_hyphen = false;
    for c in stem.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::decode_tags;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("My Photo (1)"), "my-photo-1");
        assert_eq!(slugify("--hero--"), "hero");
        assert_eq!(slugify("a   b"), "a-b");
        assert_eq!(slugify("under_score"), "under_score");
    }

    #[test]
    fn slugify_falls_back_to_image() {
        assert_eq!(slugify(""), "image");
        assert_eq!(slugify("!!!"), "image");
    }

    #[test]
    fn split_file_name_defaults_extension() {
        assert_eq!(
            split_file_name("photo.jpg"),
            ("photo".to_string(), "jpg".to_string())
        );
        assert_eq!(
            split_file_name("Scan.PNG"),
            ("scan".to_string(), "png".to_string())
        );
        assert_eq!(
            split_file_name("noext"),
            ("noext".to_string(), "jpg".to_string())
        );
    }

    #[test]
    fn next_stamp_strictly_increases_on_ties() {
        let now = Utc::now().timestamp_millis();
        assert_eq!(next_stamp(Some(now + 1000)), now + 1001);
        assert!(next_stamp(Some(now - 10_000)) >= now);
        assert!(next_stamp(None) >= now);
    }

    #[test]
    fn encode_tags_round_trips_through_decode() {
        let tags = vec!["a".to_string(), "b".to_string()];
        assert_eq!(decode_tags(Some(&encode_tags(&tags))), tags);
        assert_eq!(decode_tags(Some(&encode_tags(&[]))), Vec::<String>::new());
    }
}
