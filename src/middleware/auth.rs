use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::{error::AppError, models::User, state::AppState};

/// The user behind the bearer token of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Returns the credential part of an `Authorization: <scheme> <token>` header.
/// Parts are separated by single spaces, so `"Bearer  tok"` yields an empty
/// credential that later fails verification.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split(' ')
        .nth(1)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Invalid JWT Token".into()))?;

        let claims = state.tokens.verify(token)?;

        let stored = state
            .store
            .find_user_by_username(&claims.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid Access Token".into()))?;

        Ok(CurrentUser(stored.user))
    }
}
