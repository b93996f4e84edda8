//! Multipart upload handler.

use crate::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};

/// POST `/api/admin/upload` — store exactly one file sent under the `file`
/// field and return its public URL plus the original filename. 400 when the
/// request carries no such field.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("image").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(err.to_string()))?;
        let url = state.content.store_upload(&original, data).await?;

        return Ok(Json(json!({ "url": url, "name": original })));
    }

    Err(AppError::bad_request("no file attached"))
}
