//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::extract::{JsonObject, parse_path_id};
use crate::db::repository::tag;
use crate::sanitize::Sanitize;
use crate::state::AppState;
use crate::validation;
use shared::models::Tag;
use shared::{AppError, AppResult};

/// GET /tags - 获取所有标签
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = tag::find_all(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /tags/:id - 获取单个标签
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tag>> {
    let id = parse_path_id(&id)?;
    let t = tag::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(t))
}

/// POST /tags - 创建标签
pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let payload = validation::tag_create(&state.pool, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let t = tag::create(&state.pool, payload).await?;

    tracing::info!(tag_id = t.id, name = %t.name, "Tag created");
    Ok((StatusCode::CREATED, Json(t)))
}

/// PATCH /tags/:id - 更新标签
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<Tag>> {
    let id = parse_path_id(&id)?;
    if tag::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found());
    }

    let payload = validation::tag_update(&state.pool, id, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let t = tag::update(&state.pool, id, payload).await?;

    tracing::info!(tag_id = id, "Tag updated");
    Ok(Json(t))
}

/// DELETE /tags/:id - 删除标签 (解除所有卡片关联)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_path_id(&id)?;
    if !tag::delete(&state.pool, id).await? {
        return Err(AppError::not_found());
    }

    tracing::info!(tag_id = id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
