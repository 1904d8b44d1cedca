//! Card Repository

use std::collections::HashMap;

use super::{RepoError, RepoResult, card_tag, id_array, map_constraint};
use shared::models::{Card, CardCreate, CardUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, content, position, color, list_id, created_at, updated_at";
const ORDER: &str = "ORDER BY position ASC NULLS LAST, id ASC";

pub const LIST_MISSING: &str = "The list of the card does not exist";

/// All cards, each with its tags
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Card>> {
    let cards = sqlx::query_as::<_, Card>(&format!("SELECT {COLUMNS} FROM card {ORDER}"))
        .fetch_all(pool)
        .await?;
    with_tags(pool, cards).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Card>> {
    let card = sqlx::query_as::<_, Card>(&format!("SELECT {COLUMNS} FROM card WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(card)
}

/// Card with its tags loaded
pub async fn find_with_tags(pool: &SqlitePool, id: i64) -> RepoResult<Option<Card>> {
    let Some(mut card) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    card.tags = Some(card_tag::tags_of_card(pool, id).await?);
    Ok(Some(card))
}

/// Cards of one list in position order, each with its tags
pub async fn find_by_list(pool: &SqlitePool, list_id: i64) -> RepoResult<Vec<Card>> {
    let cards = sqlx::query_as::<_, Card>(&format!(
        "SELECT {COLUMNS} FROM card WHERE list_id = ? {ORDER}"
    ))
    .bind(list_id)
    .fetch_all(pool)
    .await?;
    with_tags(pool, cards).await
}

/// Cards of several lists grouped by list id, each with its tags
pub async fn find_by_lists(
    pool: &SqlitePool,
    list_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<Card>>> {
    if list_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let cards = sqlx::query_as::<_, Card>(&format!(
        "SELECT {COLUMNS} FROM card WHERE list_id IN (SELECT value FROM json_each(?)) {ORDER}"
    ))
    .bind(id_array(list_ids))
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<Card>> = HashMap::new();
    for card in with_tags(pool, cards).await? {
        grouped.entry(card.list_id).or_default().push(card);
    }
    Ok(grouped)
}

/// Fill `tags` on every card with one batch query
pub async fn with_tags(pool: &SqlitePool, mut cards: Vec<Card>) -> RepoResult<Vec<Card>> {
    let ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
    let mut tags = card_tag::tags_for_cards(pool, &ids).await?;
    for card in &mut cards {
        card.tags = Some(tags.remove(&card.id).unwrap_or_default());
    }
    Ok(cards)
}

pub async fn create(pool: &SqlitePool, data: CardCreate) -> RepoResult<Card> {
    let now = now_millis();
    sqlx::query_as::<_, Card>(&format!(
        "INSERT INTO card (content, position, color, list_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.content)
    .bind(data.position)
    .bind(&data.color)
    .bind(data.list_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Database("Failed to create card".into()),
            || RepoError::Validation(LIST_MISSING.into()),
        )
    })
}

/// Apply a partial update; an empty changeset only re-reads the row
pub async fn update(pool: &SqlitePool, id: i64, data: CardUpdate) -> RepoResult<Card> {
    if data.is_empty() {
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Card {id} not found")));
    }

    sqlx::query_as::<_, Card>(&format!(
        "UPDATE card SET \
            content = COALESCE(?1, content), \
            position = CASE WHEN ?2 THEN ?3 ELSE position END, \
            color = CASE WHEN ?4 THEN ?5 ELSE color END, \
            list_id = COALESCE(?6, list_id), \
            updated_at = ?7 \
         WHERE id = ?8 RETURNING {COLUMNS}"
    ))
    .bind(&data.content)
    .bind(data.position.is_write())
    .bind(data.position.value().copied())
    .bind(data.color.is_write())
    .bind(data.color.value().cloned())
    .bind(data.list_id)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Database(format!("Failed to update card {id}")),
            || RepoError::Validation(LIST_MISSING.into()),
        )
    })?
    .ok_or_else(|| RepoError::NotFound(format!("Card {id} not found")))
}

/// Hard delete a card; its tag links go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM card WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
