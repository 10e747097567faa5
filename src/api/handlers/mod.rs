use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::db::Database;
use crate::models::*;

type ApiError = (StatusCode, String);

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn memo_not_found(id: i64) -> ApiError {
    tracing::warn!(id, "Memo not found");
    (StatusCode::NOT_FOUND, "Memo not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Memos
// ============================================================

pub async fn list_memos(
    State(db): State<Database>,
) -> Result<Json<Vec<MemoResponse>>, ApiError> {
    let memos = db.get_all_memos().map_err(internal_error)?;
    Ok(Json(memos.into_iter().map(Into::into).collect()))
}

pub async fn get_memo(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<MemoResponse>, ApiError> {
    db.get_memo(id)
        .map_err(internal_error)?
        .map(|m| Json(MemoResponse::from(m)))
        .ok_or_else(|| memo_not_found(id))
}

pub async fn create_memo(
    State(db): State<Database>,
    Json(input): Json<MemoRequest>,
) -> Result<(StatusCode, Json<MemoResponse>), ApiError> {
    db.create_memo(input)
        .map(|m| (StatusCode::CREATED, Json(MemoResponse::from(m))))
        .map_err(internal_error)
}

pub async fn update_memo(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<MemoRequest>,
) -> Result<Json<i64>, ApiError> {
    db.update_memo(id, input)
        .map_err(internal_error)?
        .map(|m| Json(m.id))
        .ok_or_else(|| memo_not_found(id))
}

pub async fn delete_memo(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<i64>, ApiError> {
    db.delete_memo(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| memo_not_found(id))
}
