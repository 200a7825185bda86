use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::database::{Database, Todo};
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::parse_todo_id;

/// GET /todo/:todoID - fetch one to-do scoped to the authenticated user.
///
/// A record owned by someone else is indistinguishable from a missing one.
pub async fn get_todo(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(todo_id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    let todo = db
        .todos()
        .find_one(todo_id, user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("todo lookup failed: {}", e);
            ApiError::internal_server_error("Failed to get todo")
        })?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Json(todo))
}
