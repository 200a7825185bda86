use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::ValidatedJson;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// POST /auth/login - verify credentials and return a bearer token.
///
/// An unregistered email answers 401 while a wrong password answers 400.
pub async fn login(
    State(db): State<Database>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = db
        .users()
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            tracing::error!("user lookup failed: {}", e);
            ApiError::internal_server_error("Login operation failed")
        })?
        .ok_or_else(|| ApiError::unauthorized("Email is not registered"))?;

    // Deliberately CPU-bound; one hash comparison per attempt.
    let password_matches = bcrypt::verify(&payload.password, &user.password).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("Login operation failed")
    })?;

    if !password_matches {
        return Err(ApiError::bad_request("Wrong password"));
    }

    let token = auth::issue(user.id).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to generate token")
    })?;

    Ok(Json(json!({
        "message": "Successfully logged in",
        "token": token,
    })))
}
