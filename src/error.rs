use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::templates;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Login required")]
    Unauthorized { next: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found")]
    NotFound,

    #[error("That username is taken")]
    DuplicateUsername,

    #[error("That email is taken")]
    DuplicateEmail,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    templates::error_page(500, "Something went wrong on our end."),
                )
                    .into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    templates::error_page(500, "Something went wrong on our end."),
                )
                    .into_response()
            }
            AppError::Unauthorized { next } => {
                // Preserve the originally requested path for the post-login redirect.
                let target = format!("/login?next={}", urlencoding::encode(&next));
                Redirect::to(&target).into_response()
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                templates::error_page(401, "Invalid credentials."),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                templates::error_page(404, "That page does not exist."),
            )
                .into_response(),
            AppError::DuplicateUsername | AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                templates::error_page(409, "That username or email is already taken."),
            )
                .into_response(),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, templates::error_page(400, &msg)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
