//! Handlers for the gallery image endpoints. Store work is delegated to
//! `ContentService`; every successful mutation is pushed to the change feed.

use crate::{
    errors::AppError,
    models::image::{CreateImage, Image, UpdateImage},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

/// GET `/api/images` — all images, newest first.
pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<Image>>, AppError> {
    Ok(Json(state.content.list_images().await?))
}

/// POST `/api/admin/images` — create an image record.
pub async fn create_image(
    State(state): State<AppState>,
    Json(req): Json<CreateImage>,
) -> Result<Json<Value>, AppError> {
    let id = state.content.create_image(req).await?;
    state
        .events
        .publish("images", json!({ "action": "created", "id": id }));
    Ok(Json(json!({ "id": id })))
}

/// PATCH `/api/admin/images/{id}` — partial update, 404 when missing.
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateImage>,
) -> Result<Json<Value>, AppError> {
    state.content.update_image(id, req).await?;
    state
        .events
        .publish("images", json!({ "action": "updated", "id": id }));
    Ok(Json(json!({ "ok": true })))
}

/// DELETE `/api/admin/images/{id}` — unconditional delete plus best-effort
/// cleanup of the backing upload.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.content.delete_image(id).await?;
    state
        .events
        .publish("images", json!({ "action": "deleted", "id": id }));
    Ok(Json(json!({ "ok": true })))
}
