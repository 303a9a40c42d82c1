use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::auth::{AuthService, LoginRequest, TokenResponse};
use crate::error::AppResult;

pub struct AuthController {
    auth_service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }

    /// POST /api/auth/login - Exchange credentials for a bearer token
    pub async fn login(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<LoginRequest>,
    ) -> AppResult<Json<TokenResponse>> {
        let response = controller.auth_service.login(request).await?;
        Ok(Json(response))
    }
}
