use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ChannelServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("channel not found")]
    NotFound,
    #[error("channel name already taken")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ChannelServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ChannelServiceError::Invalid(msg),
            AppError::NotFound(_) => ChannelServiceError::NotFound,
            AppError::Conflict(_) => ChannelServiceError::Conflict,
            _ => ChannelServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ChannelServiceError> for AppError {
    fn from(err: ChannelServiceError) -> Self {
        match err {
            ChannelServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ChannelServiceError::NotFound => AppError::NotFound("Channel not found".to_string()),
            ChannelServiceError::Conflict => {
                AppError::Conflict("Channel name already taken".to_string())
            }
            ChannelServiceError::Dependency(msg) => AppError::Internal(msg),
            ChannelServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
