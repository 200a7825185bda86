use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::todos::TodoRepository;
use crate::database::users::UserRepository;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Surface unique-key violations as their own variant so callers can map
    /// them onto 409 instead of a generic storage failure.
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DatabaseError::UniqueViolation(db_err.message().to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id          BIGSERIAL PRIMARY KEY,
        email       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_TODOS: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id              BIGSERIAL PRIMARY KEY,
        user_id         BIGINT NOT NULL REFERENCES users (id),
        title           TEXT NOT NULL,
        description     TEXT NOT NULL,
        is_completed    BOOLEAN NOT NULL DEFAULT FALSE,
        created_time    TIMESTAMPTZ NOT NULL,
        completed_time  TIMESTAMPTZ,
        due_date        TIMESTAMPTZ
    )
"#;

const CREATE_TODOS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS todos_user_id_idx ON todos (user_id)";

/// Explicitly constructed persistence handle. Built once at startup and
/// passed to the router as shared state; handlers never reach for a global.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database named by `DATABASE_URL`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&url)
            .await?;

        info!("Created database pool");
        Ok(Self { pool })
    }

    /// Create the schema if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_TODOS).execute(&self.pool).await?;
        sqlx::query(CREATE_TODOS_OWNER_INDEX)
            .execute(&self.pool)
            .await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn todos(&self) -> TodoRepository {
        TodoRepository::new(self.pool.clone())
    }
}
