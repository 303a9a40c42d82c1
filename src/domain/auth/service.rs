use super::dto::{LoginRequest, TokenResponse};
use super::jwt::JwtManager;
use super::password::verify_password;
use crate::domain::user::UserStore;
use crate::error::{AppError, AppResult};
use std::sync::Arc;

pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    jwt_manager: JwtManager,
    expiration_hours: i64,
}

impl AuthService {
    pub fn new(user_store: Arc<dyn UserStore>, jwt_secret: String, expiration_hours: i64) -> Self {
        Self {
            user_store,
            jwt_manager: JwtManager::new(jwt_secret, expiration_hours),
            expiration_hours,
        }
    }

    /// Exchange username + password for a bearer token.
    /// Unknown user and wrong password produce the same error message.
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let user = self
            .user_store
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.jwt_manager.generate_token(user.id, &user.username)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(TokenResponse {
            token,
            expires_in: self.expiration_hours * 3600,
        })
    }
}
