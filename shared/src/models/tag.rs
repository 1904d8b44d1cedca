//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity (标签：可挂到多张卡片上)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create tag payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCreate {
    pub name: String,
}

/// Update tag payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagUpdate {
    pub name: Option<String>,
}

impl TagUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
