use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::config;
use crate::database::{Database, DatabaseError};
use crate::error::ApiError;
use crate::handlers::ValidatedJson;
use crate::middleware::MessageResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// POST /auth/register - create a new user account.
///
/// The password is stored only as a bcrypt hash. A duplicate email is
/// rejected with 409; the existing account is never overwritten.
pub async fn register(
    State(db): State<Database>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<MessageResponse, ApiError> {
    let cost = config::config().security.bcrypt_cost;
    let hashed = bcrypt::hash(&payload.password, cost).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("User register operation failed")
    })?;

    match db.users().create(&payload.email, &hashed).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "registered new user");
            Ok(MessageResponse::created("User registered"))
        }
        Err(DatabaseError::UniqueViolation(_)) => {
            Err(ApiError::conflict("Email address already in use"))
        }
        Err(e) => {
            tracing::error!("user insert failed: {}", e);
            Err(ApiError::internal_server_error("User register operation failed"))
        }
    }
}
