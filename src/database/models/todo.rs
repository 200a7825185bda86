use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A single to-do record. Serialized field names are part of the public API:
/// `desc`, `dueDate`, `createdTime`, `isCompleted`, `completedTime`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub is_completed: bool,
    pub created_time: DateTime<Utc>,
    pub completed_time: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}
