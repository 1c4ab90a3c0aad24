use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

/// Failures that abort the current request.
///
/// Form validation problems are not represented here: they are recovered by
/// redisplaying the form (see [`crate::forms::FieldError`]).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("movie {id} not found")]
    NotFound { id: i32 },

    #[error("a movie with this title already exists: {0}")]
    ConstraintViolation(String),

    #[error("movie database request failed: {0}")]
    ExternalService(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::ConstraintViolation(msg),
            _ => AppError::Database(err),
        }
    }
}

impl From<wreq::Error> for AppError {
    fn from(err: wreq::Error) -> Self {
        match err.status() {
            Some(status) => AppError::ExternalService(format!("upstream returned {status}")),
            None => AppError::ExternalService(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, crate::templates::error_page(status, self.to_string())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
