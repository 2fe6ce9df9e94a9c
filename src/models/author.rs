//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Create author form
#[derive(Debug, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
}

/// Edit author form. An absent or empty name keeps the stored one.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAuthor {
    #[serde(default)]
    pub name: Option<String>,
}
