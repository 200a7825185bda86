use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Todo;

/// Fields for a new to-do record.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update: only fields carrying `Some` are applied.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}

const TODO_COLUMNS: &str =
    "id, user_id, title, description, is_completed, created_time, completed_time, due_date";

/// Typed access to the `todos` table. Every query below carries the owner id
/// as an equality predicate next to the record id; this is the only per-user
/// isolation mechanism, so no method may omit it.
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let sql = format!(
            "INSERT INTO todos (user_id, title, description, created_time, due_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {TODO_COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(user_id)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(Utc::now())
            .bind(todo.due_date)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    pub async fn find_all(&self, user_id: i64) -> Result<Vec<Todo>, DatabaseError> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    pub async fn find_one(&self, todo_id: i64, user_id: i64) -> Result<Option<Todo>, DatabaseError> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(todo_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    /// Apply a partial update and report the number of affected rows; zero
    /// means the record does not exist or is not owned by `user_id`.
    ///
    /// The read and the write run in one transaction with the row locked, so
    /// the completion transition cannot race a parallel update. The
    /// completion timestamp is stamped exactly once, on the false -> true
    /// transition, and left untouched by every other update.
    pub async fn update(
        &self,
        todo_id: i64,
        user_id: i64,
        changes: TodoChanges,
    ) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from_sqlx)?;

        let sql =
            format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2 FOR UPDATE");
        let current = sqlx::query_as::<_, Todo>(&sql)
            .bind(todo_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DatabaseError::from_sqlx)?;

        let Some(current) = current else {
            return Ok(0);
        };

        let completing = changes.is_completed == Some(true) && !current.is_completed;
        let completed_time = if completing {
            current.completed_time.or_else(|| Some(Utc::now()))
        } else {
            current.completed_time
        };

        let result = sqlx::query(
            "UPDATE todos SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                due_date = COALESCE($5, due_date), \
                is_completed = COALESCE($6, is_completed), \
                completed_time = $7 \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(todo_id)
        .bind(user_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.due_date)
        .bind(changes.is_completed)
        .bind(completed_time)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;

        tx.commit().await.map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    /// Owner-scoped delete; zero affected rows means not found / not owned.
    pub async fn delete(&self, todo_id: i64, user_id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(todo_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }
}
