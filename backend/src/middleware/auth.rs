//! Authentication middleware
//!
//! The back office is protected by a single shared bearer token from
//! `admin.api_token`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;
use crate::AppState;

/// Reject admin requests that do not carry the configured bearer token
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Response {
    let expected = state.config.admin.api_token.as_str();
    if expected.is_empty() {
        return AppError::Unauthorized("Admin access is not configured".to_string())
            .into_response();
    }

    let token = match bearer {
        Some(TypedHeader(Authorization(bearer))) => bearer.token().to_string(),
        None => {
            return AppError::Unauthorized("Missing or invalid Authorization header".to_string())
                .into_response();
        }
    };

    if !token_matches(&token, expected) {
        return AppError::Unauthorized("Invalid admin token".to_string()).into_response();
    }

    next.run(request).await
}

/// Compare without short-circuiting on the first differing byte
fn token_matches(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
