use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::freet::{CreateFreetRequest, FreetResponse, FreetService};
use crate::{
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Deserialize)]
pub struct FreetQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
}

pub struct FreetController {
    freet_service: Arc<FreetService>,
}

impl FreetController {
    pub fn new(freet_service: Arc<FreetService>) -> Self {
        Self { freet_service }
    }

    /// GET /api/freets[?author=X|tag=T] - List freets
    pub async fn list_freets(
        State(controller): State<Arc<FreetController>>,
        Query(query): Query<FreetQuery>,
    ) -> AppResult<Json<Vec<FreetResponse>>> {
        let freets = match (query.author, query.tag) {
            (Some(_), Some(_)) => {
                return Err(AppError::BadRequest(
                    "Specify either author or tag, not both".to_string(),
                ))
            }
            (Some(author), None) => controller.freet_service.list_by_author(&author).await?,
            (None, Some(tag)) => controller.freet_service.list_by_tag(&tag).await?,
            (None, None) => controller.freet_service.list_all().await?,
        };
        Ok(Json(freets))
    }

    /// POST /api/freets - Publish a new freet
    pub async fn create_freet(
        State(controller): State<Arc<FreetController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateFreetRequest>,
    ) -> AppResult<(StatusCode, Json<FreetResponse>)> {
        let freet = controller
            .freet_service
            .create(auth_user.user_id, &request.content, request.tags)
            .await?;
        Ok((StatusCode::CREATED, Json(freet)))
    }

    /// DELETE /api/freets/{freetId} - Delete own freet
    pub async fn delete_freet(
        State(controller): State<Arc<FreetController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(freet_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .freet_service
            .delete(auth_user.user_id, freet_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
