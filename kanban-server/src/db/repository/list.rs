//! List Repository

use super::{RepoError, RepoResult, card, map_constraint};
use shared::models::{List, ListCreate, ListUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, position, created_at, updated_at";

pub const NAME_IN_USE: &str = "This name of list is already in use";
pub const NAME_IN_USE_ON_OTHER: &str = "This name of list is already in use on another list";

/// All lists in position order, with their cards and the cards' tags
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<List>> {
    let mut lists = sqlx::query_as::<_, List>(&format!(
        "SELECT {COLUMNS} FROM list ORDER BY position ASC NULLS LAST, id ASC"
    ))
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = lists.iter().map(|l| l.id).collect();
    let mut cards = card::find_by_lists(pool, &ids).await?;
    for list in &mut lists {
        list.cards = Some(cards.remove(&list.id).unwrap_or_default());
    }
    Ok(lists)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<List>> {
    let list = sqlx::query_as::<_, List>(&format!("SELECT {COLUMNS} FROM list WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(list)
}

/// List with its cards (and their tags) loaded
pub async fn find_with_cards(pool: &SqlitePool, id: i64) -> RepoResult<Option<List>> {
    let Some(mut list) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    list.cards = Some(card::find_by_list(pool, id).await?);
    Ok(Some(list))
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<List>> {
    let list = sqlx::query_as::<_, List>(&format!(
        "SELECT {COLUMNS} FROM list WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(list)
}

/// Find a list named `name` other than `id` (rename conflicts)
pub async fn find_other_by_name(
    pool: &SqlitePool,
    name: &str,
    id: i64,
) -> RepoResult<Option<List>> {
    let list = sqlx::query_as::<_, List>(&format!(
        "SELECT {COLUMNS} FROM list WHERE name = ? AND id <> ? LIMIT 1"
    ))
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(list)
}

pub async fn create(pool: &SqlitePool, data: ListCreate) -> RepoResult<List> {
    let now = now_millis();
    sqlx::query_as::<_, List>(&format!(
        "INSERT INTO list (name, position, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.position)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Duplicate(NAME_IN_USE.into()),
            || RepoError::Database("Failed to create list".into()),
        )
    })
}

/// Apply a partial update; an empty changeset only re-reads the row
pub async fn update(pool: &SqlitePool, id: i64, data: ListUpdate) -> RepoResult<List> {
    if data.is_empty() {
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("List {id} not found")));
    }

    sqlx::query_as::<_, List>(&format!(
        "UPDATE list SET \
            name = COALESCE(?1, name), \
            position = CASE WHEN ?2 THEN ?3 ELSE position END, \
            updated_at = ?4 \
         WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.position.is_write())
    .bind(data.position.value().copied())
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Duplicate(NAME_IN_USE_ON_OTHER.into()),
            || RepoError::Database(format!("Failed to update list {id}")),
        )
    })?
    .ok_or_else(|| RepoError::NotFound(format!("List {id} not found")))
}

/// Hard delete a list together with its cards
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM list WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
