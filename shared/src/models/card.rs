//! Card Model

use serde::{Deserialize, Serialize};

use super::{Patch, Tag};

/// Card entity
///
/// Belongs to exactly one list; `position` orders cards inside that list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Card {
    pub id: i64,
    pub content: String,
    pub position: Option<i64>,
    pub color: Option<String>,
    pub list_id: i64,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Attached tags, present only on reads that load them
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// Create card payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCreate {
    pub content: String,
    pub position: Option<i64>,
    pub color: Option<String>,
    pub list_id: i64,
}

/// Update card payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub content: Option<String>,
    pub position: Patch<i64>,
    pub color: Patch<String>,
    pub list_id: Option<i64>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.position.is_keep()
            && self.color.is_keep()
            && self.list_id.is_none()
    }
}
