use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    error::{AppError, AppResult},
    models::{NewUser, User},
    response::{ApiResponse, MessageResponse},
    state::AppState,
    store::{USERS_EMAIL_KEY, USERS_USERNAME_KEY},
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<MessageResponse> {
    let RegisterRequest {
        username,
        password,
        email,
    } = payload;
    if username.trim().is_empty() || password.is_empty() || email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "username, password and email are required".into(),
        ));
    }

    if state.store.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash = hash_password(&password)?;
    let user = state
        .store
        .insert_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|err| {
            if err.is_duplicate_of(USERS_USERNAME_KEY) {
                AppError::Conflict("Username already exists".into())
            } else if err.is_duplicate_of(USERS_EMAIL_KEY) {
                AppError::Conflict("Email already exists".into())
            } else {
                AppError::from(err)
            }
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(MessageResponse::message("User registered successfully"))
}

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let LoginRequest { username, password } = payload;
    let stored = match state.store.find_user_by_username(&username).await? {
        Some(u) => u,
        None => {
            return Err(AppError::BadRequest(
                "Invalid Username, please Register".into(),
            ));
        }
    };

    if !verify_password(&password, &stored.password_hash)? {
        return Err(AppError::BadRequest("Invalid Password".into()));
    }

    let jwt_token = state.tokens.issue(&stored.user.username)?;
    tracing::info!(user_id = %stored.user.id, "user logged in");
    Ok(LoginResponse { jwt_token })
}

pub fn user_info(user: User) -> ApiResponse<User> {
    ApiResponse::success("OK", user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("p", &first).unwrap());
        assert!(!verify_password("q", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        assert!(matches!(
            verify_password("p", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }
}
