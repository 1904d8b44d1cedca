//! Card ↔ Tag association (`card_has_tag`)

use std::collections::HashMap;

use super::{RepoError, RepoResult, id_array, map_constraint};
use shared::models::Tag;
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct CardTagRow {
    card_id: i64,
    #[sqlx(flatten)]
    tag: Tag,
}

/// Link a tag to a card; linking twice is a no-op
pub async fn attach(pool: &SqlitePool, card_id: i64, tag_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT OR IGNORE INTO card_has_tag (card_id, tag_id) VALUES (?, ?)")
        .bind(card_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                || RepoError::Database("card_has_tag unique violation".into()),
                || RepoError::NotFound(format!("Card {card_id} or tag {tag_id} not found")),
            )
        })?;
    Ok(())
}

/// Remove a link; returns whether one existed
pub async fn detach(pool: &SqlitePool, card_id: i64, tag_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM card_has_tag WHERE card_id = ? AND tag_id = ?")
        .bind(card_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Tags of one card, by name
pub async fn tags_of_card(pool: &SqlitePool, card_id: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.name, t.created_at, t.updated_at FROM tag t \
         JOIN card_has_tag cht ON cht.tag_id = t.id \
         WHERE cht.card_id = ? ORDER BY t.name, t.id",
    )
    .bind(card_id)
    .fetch_all(pool)
    .await?;
    Ok(tags)
}

/// Batch load tags for many cards, grouped by card id
///
/// Cards without tags are absent from the map.
pub async fn tags_for_cards(
    pool: &SqlitePool,
    card_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<Tag>>> {
    if card_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, CardTagRow>(
        "SELECT cht.card_id, t.id, t.name, t.created_at, t.updated_at FROM card_has_tag cht \
         JOIN tag t ON t.id = cht.tag_id \
         WHERE cht.card_id IN (SELECT value FROM json_each(?)) \
         ORDER BY t.name, t.id",
    )
    .bind(id_array(card_ids))
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        grouped.entry(row.card_id).or_default().push(row.tag);
    }
    Ok(grouped)
}
