use axum::{extract::State, Extension};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::database::{Database, NewTodo};
use crate::error::ApiError;
use crate::handlers::ValidatedJson;
use crate::middleware::{AuthUser, MessageResponse};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 50))]
    pub title: String,
    #[validate(length(min = 3, max = 200))]
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
}

/// POST /todo - create a to-do owned by the authenticated user.
pub async fn create_todo(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<MessageResponse, ApiError> {
    let todo = NewTodo {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
    };

    db.todos().create(user.user_id, todo).await.map_err(|e| {
        tracing::error!("todo insert failed: {}", e);
        ApiError::internal_server_error("Todo create operation failed")
    })?;

    Ok(MessageResponse::created("Todo successfully created"))
}
