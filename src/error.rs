use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};
use thiserror::Error;
use tracing::error;

use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected locally before any backend call.
    #[error("{0}")]
    Validation(String),

    /// The backend refused the call; the message is shown as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}

impl AppError {
    /// Text that is safe to put in front of a user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Rejected(msg) => msg.clone(),
            AppError::Transport(_) => "The service is unreachable, please try again later".to_string(),
            AppError::Database(_) | AppError::Config(_) | AppError::InternalServerError => {
                "Something went wrong on our side".to_string()
            }
            AppError::NotFound => "Oops! Page not found".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(_) => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Config(_) | AppError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        error!("backend transport error: {}", err);
        AppError::Transport(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Transport(e) => error!("transport error: {}", e),
            AppError::Database(e) => error!("database error: {}", e),
            AppError::Config(e) => error!("configuration error: {}", e),
            _ => {}
        }

        let body = Html(views::error_page(status, &self.user_message()));

        (status, body).into_response()
    }
}
