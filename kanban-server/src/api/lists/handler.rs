//! List API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::extract::{JsonObject, parse_path_id};
use crate::db::repository::{card, list};
use crate::sanitize::Sanitize;
use crate::state::AppState;
use crate::validation;
use shared::models::{Card, List};
use shared::{AppError, AppResult};

/// GET /lists - 获取所有列表 (含卡片和标签)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<List>>> {
    let lists = list::find_all(&state.pool).await?;
    Ok(Json(lists))
}

/// GET /lists/:id - 获取单个列表 (含卡片和标签)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<List>> {
    let id = parse_path_id(&id)?;
    let l = list::find_with_cards(&state.pool, id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(l))
}

/// GET /lists/:id/cards - 获取列表下的卡片
pub async fn cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Card>>> {
    let id = parse_path_id(&id)?;
    if list::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found());
    }
    let cards = card::find_by_list(&state.pool, id).await?;
    Ok(Json(cards))
}

/// POST /lists - 创建列表
pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<List>)> {
    let payload = validation::list_create(&state.pool, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let l = list::create(&state.pool, payload).await?;

    tracing::info!(list_id = l.id, name = %l.name, "List created");
    Ok((StatusCode::CREATED, Json(l)))
}

/// PATCH /lists/:id - 更新列表
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<List>> {
    let id = parse_path_id(&id)?;
    if list::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found());
    }

    let payload = validation::list_update(&state.pool, id, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let l = list::update(&state.pool, id, payload).await?;

    tracing::info!(list_id = id, "List updated");
    Ok(Json(l))
}

/// DELETE /lists/:id - 删除列表 (连同卡片)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_path_id(&id)?;
    if !list::delete(&state.pool, id).await? {
        return Err(AppError::not_found());
    }

    tracing::info!(list_id = id, "List deleted");
    Ok(StatusCode::NO_CONTENT)
}
