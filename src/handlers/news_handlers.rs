//! Handlers for the news article endpoints.

use crate::{
    errors::AppError,
    models::news::{CreateNews, NewsArticle, UpdateNews},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

/// GET `/api/news` — all articles, newest first.
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsArticle>>, AppError> {
    Ok(Json(state.content.list_news().await?))
}

/// GET `/api/news/{id}` — one article, 404 when missing.
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NewsArticle>, AppError> {
    Ok(Json(state.content.get_news(id).await?))
}

/// POST `/api/admin/news` — create an article, 400 unless both title and
/// body are present and non-empty.
pub async fn create_news(
    State(state): State<AppState>,
    Json(req): Json<CreateNews>,
) -> Result<Json<Value>, AppError> {
    let id = state.content.create_news(req).await?;
    state
        .events
        .publish("news", json!({ "action": "created", "id": id }));
    Ok(Json(json!({ "id": id })))
}

/// PATCH `/api/admin/news/{id}` — partial update, 404 when missing.
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateNews>,
) -> Result<Json<Value>, AppError> {
    state.content.update_news(id, req).await?;
    state
        .events
        .publish("news", json!({ "action": "updated", "id": id }));
    Ok(Json(json!({ "ok": true })))
}

/// DELETE `/api/admin/news/{id}` — unconditional delete.
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.content.delete_news(id).await?;
    state
        .events
        .publish("news", json!({ "action": "deleted", "id": id }));
    Ok(Json(json!({ "ok": true })))
}
