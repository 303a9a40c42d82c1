use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::user::{RegisterRequest, UserResponse, UserService};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct UserController {
    user_service: Arc<UserService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    /// POST /api/users - Register a new account (public)
    pub async fn register(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<RegisterRequest>,
    ) -> AppResult<(StatusCode, Json<UserResponse>)> {
        let user = controller
            .user_service
            .register(&request.username, &request.password)
            .await?;
        Ok((StatusCode::CREATED, Json(user.into())))
    }

    /// GET /api/users/me - Current user's profile
    pub async fn get_me(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<UserResponse>> {
        let user = controller.user_service.get_profile(auth_user.user_id).await?;
        Ok(Json(user.into()))
    }

    /// DELETE /api/users/me - Delete the account and its feed
    pub async fn delete_me(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<StatusCode> {
        controller
            .user_service
            .delete_account(auth_user.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/users/me/following - Users the caller follows
    pub async fn list_following(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<UserResponse>>> {
        let users = controller.user_service.following(auth_user.user_id).await?;
        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    /// POST /api/users/me/following/{username} - Follow a user
    pub async fn follow(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(username): Path<String>,
    ) -> AppResult<StatusCode> {
        controller
            .user_service
            .follow(auth_user.user_id, &username)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/users/me/following/{username} - Unfollow a user
    pub async fn unfollow(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(username): Path<String>,
    ) -> AppResult<StatusCode> {
        controller
            .user_service
            .unfollow(auth_user.user_id, &username)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
