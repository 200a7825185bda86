use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::database::{Database, TodoChanges};
use crate::error::ApiError;
use crate::handlers::ValidatedJson;
use crate::middleware::{AuthUser, MessageResponse};

use super::parse_todo_id;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(max = 50))]
    pub title: Option<String>,
    #[validate(length(max = 200))]
    #[serde(rename = "desc")]
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "isCompleted")]
    pub is_completed: Option<bool>,
}

/// PUT /todo/:todoID - partial update of a to-do, scoped to the caller.
///
/// The completion timestamp is handled by the repository: it is stamped the
/// instant `isCompleted` transitions false -> true and never again.
pub async fn update_todo(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(todo_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> Result<MessageResponse, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let changes = TodoChanges {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        is_completed: payload.is_completed,
    };

    let affected = db
        .todos()
        .update(todo_id, user.user_id, changes)
        .await
        .map_err(|e| {
            tracing::error!("todo update failed: {}", e);
            ApiError::internal_server_error("Todo update failed")
        })?;

    if affected == 0 {
        return Err(ApiError::not_found("Todo not found"));
    }

    Ok(MessageResponse::ok("Todo successfully updated"))
}
