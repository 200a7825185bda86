use axum::{
    extract::{Path, State},
    Extension,
};

use crate::database::Database;
use crate::error::ApiError;
use crate::middleware::{AuthUser, MessageResponse};

use super::parse_todo_id;

/// DELETE /todo/:todoID - delete a to-do, scoped to the caller.
pub async fn delete_todo(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(todo_id): Path<String>,
) -> Result<MessageResponse, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let affected = db
        .todos()
        .delete(todo_id, user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("todo delete failed: {}", e);
            ApiError::internal_server_error("Todo delete operation failed")
        })?;

    if affected == 0 {
        return Err(ApiError::not_found("Todo not found"));
    }

    Ok(MessageResponse::ok("Todo successfully deleted"))
}
