use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Prefix of every generated display name.
pub const VISITOR_NAME_PREFIX: &str = "Visitor_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Visitor {
    pub id: i64,
    pub name: String,
    /// Server-assigned insertion time, rendered by the backend as text.
    pub created_at: String,
}

/// Display name for the visitor inserted after `existing` rows.
pub fn visitor_name(existing: i64) -> String {
    format!("{VISITOR_NAME_PREFIX}{}", existing + 1)
}
