//! Tag Repository

use super::{RepoError, RepoResult, map_constraint};
use shared::models::{Tag, TagCreate, TagUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub const NAME_IN_USE: &str = "This name of tag is already in use";
pub const NAME_IN_USE_ON_OTHER: &str = "This name of tag is already in use on another tag";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(&format!(
        "SELECT {COLUMNS} FROM tag ORDER BY name, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(tags)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>(&format!("SELECT {COLUMNS} FROM tag WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tag)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>(&format!(
        "SELECT {COLUMNS} FROM tag WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(tag)
}

/// Find a tag named `name` other than `id` (rename conflicts)
pub async fn find_other_by_name(
    pool: &SqlitePool,
    name: &str,
    id: i64,
) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>(&format!(
        "SELECT {COLUMNS} FROM tag WHERE name = ? AND id <> ? LIMIT 1"
    ))
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(tag)
}

pub async fn create(pool: &SqlitePool, data: TagCreate) -> RepoResult<Tag> {
    let now = now_millis();
    sqlx::query_as::<_, Tag>(&format!(
        "INSERT INTO tag (name, created_at, updated_at) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Duplicate(NAME_IN_USE.into()),
            || RepoError::Database("Failed to create tag".into()),
        )
    })
}

pub async fn update(pool: &SqlitePool, id: i64, data: TagUpdate) -> RepoResult<Tag> {
    if data.is_empty() {
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Tag {id} not found")));
    }

    sqlx::query_as::<_, Tag>(&format!(
        "UPDATE tag SET name = COALESCE(?1, name), updated_at = ?2 WHERE id = ?3 RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        map_constraint(
            e,
            || RepoError::Duplicate(NAME_IN_USE_ON_OTHER.into()),
            || RepoError::Database(format!("Failed to update tag {id}")),
        )
    })?
    .ok_or_else(|| RepoError::NotFound(format!("Tag {id} not found")))
}

/// Hard delete a tag; its card links go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM tag WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
