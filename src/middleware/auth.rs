use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Authenticated principal resolved from the bearer token. Injected into the
/// request extensions as a typed value; handlers take it as `Extension<AuthUser>`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Bearer-token middleware guarding every /todo route. Each request is
/// authenticated independently; nothing is retained between requests.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;

    // One generic message for every verification failure; callers must not
    // learn which check rejected the token.
    let user_id =
        auth::verify(&token).map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    let mut parts = auth_str.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(ApiError::unauthorized("Invalid Authorization header format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_scheme_case_insensitively() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc")).unwrap(),
            "abc"
        );
        assert_eq!(
            extract_bearer_token(&headers_with("bearer abc")).unwrap(),
            "abc"
        );
        assert_eq!(
            extract_bearer_token(&headers_with("BEARER abc")).unwrap(),
            "abc"
        );
    }

    #[test]
    fn rejects_missing_header() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.message(), "Missing Authorization header");
    }

    #[test]
    fn rejects_wrong_scheme() {
        let err = extract_bearer_token(&headers_with("Token abc")).unwrap_err();
        assert_eq!(err.message(), "Invalid Authorization header format");
    }

    #[test]
    fn rejects_single_part_header() {
        let err = extract_bearer_token(&headers_with("Bearer")).unwrap_err();
        assert_eq!(err.message(), "Invalid Authorization header format");
    }
}
