use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the tracker's domain operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("User doesn't exist. Please signup first.")]
    UserNotFound,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Unknown activity type: {0}")]
    UnknownActivityType(String),

    #[error("{0}")]
    Validation(String),

    #[error("You must be logged in")]
    NotLoggedIn,
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unknown_activity(label: impl Into<String>) -> Self {
        Self::UnknownActivityType(label.into())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        let status = match err {
            TrackerError::DuplicateEmail => StatusCode::CONFLICT,
            TrackerError::UserNotFound => StatusCode::NOT_FOUND,
            TrackerError::InvalidCredentials | TrackerError::NotLoggedIn => {
                StatusCode::UNAUTHORIZED
            }
            TrackerError::UnknownActivityType(_) | TrackerError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
