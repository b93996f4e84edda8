//! Route table for the content API.
//!
//! ## Structure
//! - **Public endpoints**
//!   - `GET /api/images` — list gallery images
//!   - `GET /api/news`, `GET /api/news/{id}` — article reader
//!   - `GET /api/meta` — category/tag metadata
//!   - `GET /api/events` — SSE change-notification stream
//! - **Admin endpoints** (mounted under /api/admin, no auth layer)
//!   - `POST /api/admin/images`, `PATCH|DELETE /api/admin/images/{id}`
//!   - `POST /api/admin/news`, `PATCH|DELETE /api/admin/news/{id}`
//!   - `PATCH /api/admin/meta`
//!   - `POST /api/admin/upload` — single multipart file
//!
//! Static assets, uploads included, are mounted separately in `main`.

use crate::{
    handlers::{
        event_handlers::subscribe_events,
        health_handlers::{healthz, readyz},
        image_handlers::{create_image, delete_image, list_images, update_image},
        meta_handlers::{get_meta, update_meta},
        news_handlers::{create_news, delete_news, get_news, list_news, update_news},
        upload_handlers::upload,
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

/// 50 MB cap for uploaded files.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build and return the router for all API routes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // public read + subscription routes
        .route("/api/events", get(subscribe_events))
        .route("/api/images", get(list_images))
        .route("/api/news", get(list_news))
        .route("/api/news/{id}", get(get_news))
        .route("/api/meta", get(get_meta))
        // admin mutation routes
        .route("/api/admin/images", post(create_image))
        .route(
            "/api/admin/images/{id}",
            patch(update_image).delete(delete_image),
        )
        .route("/api/admin/news", post(create_news))
        .route(
            "/api/admin/news/{id}",
            patch(update_news).delete(delete_news),
        )
        .route("/api/admin/meta", patch(update_meta))
        .route(
            "/api/admin/upload",
            post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
