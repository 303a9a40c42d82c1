use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FreetServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("freet not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for FreetServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => FreetServiceError::Invalid(msg),
            AppError::NotFound(_) => FreetServiceError::NotFound,
            _ => FreetServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<FreetServiceError> for AppError {
    fn from(err: FreetServiceError) -> Self {
        match err {
            FreetServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FreetServiceError::NotFound => AppError::NotFound("Freet not found".to_string()),
            FreetServiceError::Dependency(msg) => AppError::Internal(msg),
            FreetServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
