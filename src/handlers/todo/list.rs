use axum::{extract::State, Extension, Json};

use crate::database::{Database, Todo};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /todo - list every to-do owned by the authenticated user.
pub async fn list_todos(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = db.todos().find_all(user.user_id).await.map_err(|e| {
        tracing::error!("todo listing failed: {}", e);
        ApiError::internal_server_error("Failed to list todos")
    })?;

    Ok(Json(todos))
}
