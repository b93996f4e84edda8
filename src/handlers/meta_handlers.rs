//! Handlers for the category/tag metadata singletons.

use crate::{
    errors::AppError,
    models::meta::{SiteMeta, UpdateMeta},
    state::AppState,
};
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// GET `/api/meta` — current categories and tag shortlist, empty when unset.
pub async fn get_meta(State(state): State<AppState>) -> Result<Json<SiteMeta>, AppError> {
    Ok(Json(state.content.get_meta().await?))
}

/// PATCH `/api/admin/meta` — replace both singletons.
pub async fn update_meta(
    State(state): State<AppState>,
    Json(req): Json<UpdateMeta>,
) -> Result<Json<Value>, AppError> {
    let meta = req.normalize();
    state.content.set_meta(&meta).await?;
    state.events.publish("meta", json!({ "action": "updated" }));
    Ok(Json(json!({ "ok": true })))
}
