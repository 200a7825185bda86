pub mod manager;
pub mod models;
pub mod todos;
pub mod users;

pub use manager::{Database, DatabaseError};
pub use models::{Todo, User};
pub use todos::{NewTodo, TodoChanges, TodoRepository};
pub use users::UserRepository;
