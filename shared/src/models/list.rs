//! List Model

use serde::{Deserialize, Serialize};

use super::{Card, Patch};

/// List entity (看板列)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct List {
    pub id: i64,
    pub name: String,
    pub position: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Cards ordered by position, each with its tags
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

/// Create list payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCreate {
    pub name: String,
    pub position: Option<i64>,
}

/// Update list payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub position: Patch<i64>,
}

impl ListUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position.is_keep()
    }
}
