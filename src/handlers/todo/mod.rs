use crate::error::ApiError;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::create_todo;
pub use delete::delete_todo;
pub use get::get_todo;
pub use list::list_todos;
pub use update::update_todo;

/// Parse the `:todoID` path segment. Ids are unsigned on the wire.
fn parse_todo_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| ApiError::bad_request("wrong formatted id"))
}
