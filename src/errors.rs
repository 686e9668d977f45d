use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode data: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MoodError {
    #[error("no mood entry at index {index} (list has {len})")]
    IndexOutOfRange { index: i64, len: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}

impl From<MoodError> for AppError {
    fn from(err: MoodError) -> Self {
        match err {
            MoodError::IndexOutOfRange { .. } => Self::not_found(err.to_string()),
            MoodError::Storage(inner) => Self::internal(inner),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
