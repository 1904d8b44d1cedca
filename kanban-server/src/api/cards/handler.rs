//! Card API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::extract::{JsonObject, parse_path_id};
use crate::db::repository::{card, card_tag, tag};
use crate::sanitize::Sanitize;
use crate::state::AppState;
use crate::validation::{self, parse_integer};
use shared::models::Card;
use shared::{AppError, AppResult};

/// GET /cards - 获取所有卡片 (含标签)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = card::find_all(&state.pool).await?;
    Ok(Json(cards))
}

/// GET /cards/:id - 获取单张卡片 (含标签)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Card>> {
    let id = parse_path_id(&id)?;
    let c = card::find_with_tags(&state.pool, id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(c))
}

/// POST /cards - 创建卡片
pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<Card>)> {
    let payload = validation::card_create(&state.pool, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let c = card::create(&state.pool, payload).await?;

    tracing::info!(card_id = c.id, list_id = c.list_id, "Card created");
    Ok((StatusCode::CREATED, Json(c)))
}

/// PATCH /cards/:id - 更新卡片
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<Card>> {
    let id = parse_path_id(&id)?;
    if card::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found());
    }

    let payload = validation::card_update(&state.pool, &body)
        .await?
        .sanitize(&state.sanitizer)?;
    let c = card::update(&state.pool, id, payload).await?;

    tracing::info!(card_id = id, list_id = c.list_id, "Card updated");
    Ok(Json(c))
}

/// DELETE /cards/:id - 删除卡片
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_path_id(&id)?;
    if !card::delete(&state.pool, id).await? {
        return Err(AppError::not_found());
    }

    tracing::info!(card_id = id, "Card deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /cards/:id/tag - 给卡片打标签 (body: `{"tag_id": n}`)
///
/// Unknown card, unparsable or unknown `tag_id` are all routing misses.
pub async fn attach_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<Card>> {
    let card_id = parse_path_id(&id)?;
    if card::find_by_id(&state.pool, card_id).await?.is_none() {
        return Err(AppError::not_found());
    }
    let tag_id = body
        .get("tag_id")
        .and_then(parse_integer)
        .ok_or_else(AppError::not_found)?;
    if tag::find_by_id(&state.pool, tag_id).await?.is_none() {
        return Err(AppError::not_found());
    }

    card_tag::attach(&state.pool, card_id, tag_id).await?;
    let c = card::find_with_tags(&state.pool, card_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    tracing::info!(card_id, tag_id, "Tag attached to card");
    Ok(Json(c))
}

/// DELETE /cards/:card_id/tag/:tag_id - 移除卡片标签
pub async fn detach_tag(
    State(state): State<AppState>,
    Path((card_id, tag_id)): Path<(String, String)>,
) -> AppResult<Json<Card>> {
    let card_id = parse_path_id(&card_id)?;
    if card::find_by_id(&state.pool, card_id).await?.is_none() {
        return Err(AppError::not_found());
    }
    let tag_id = parse_path_id(&tag_id)?;
    if tag::find_by_id(&state.pool, tag_id).await?.is_none() {
        return Err(AppError::not_found());
    }

    let removed = card_tag::detach(&state.pool, card_id, tag_id).await?;
    let c = card::find_with_tags(&state.pool, card_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    tracing::info!(card_id, tag_id, removed, "Tag detached from card");
    Ok(Json(c))
}
