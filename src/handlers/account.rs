use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Form,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::RequireUser;
use crate::services::user::UserService;
use crate::templates::{self, FieldError};

use super::{collect_field_errors, redirect_with_flash, render_with_flash};

#[derive(Debug, Deserialize, Validate)]
pub struct AccountForm {
    #[validate(length(min = 2, max = 20, message = "Username must be between 2 and 20 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

pub async fn account_page(RequireUser(user): RequireUser, headers: HeaderMap) -> Response {
    // Pre-fill the form with the current profile data.
    render_with_flash(&headers, |flash| {
        templates::account_page(&user, flash, &user.username, &user.email, &[])
    })
}

pub async fn account_form(
    Extension(db): Extension<DatabaseConnection>,
    RequireUser(user): RequireUser,
    Form(form): Form<AccountForm>,
) -> AppResult<Response> {
    let mut errors = form
        .validate()
        .err()
        .map(|e| collect_field_errors(&e))
        .unwrap_or_default();

    if errors.is_empty() {
        match UserService::new(db)
            .update_account(user.id, &form.username, &form.email)
            .await
        {
            Ok(_) => {
                return Ok(redirect_with_flash(
                    "/account",
                    "success",
                    "Your account has been updated!",
                ));
            }
            Err(AppError::DuplicateUsername) => errors.push(FieldError::new(
                "username",
                "That username is taken. Please choose a different one",
            )),
            Err(AppError::DuplicateEmail) => errors.push(FieldError::new(
                "email",
                "That email is taken. Please choose a different one",
            )),
            Err(e) => return Err(e),
        }
    }

    Ok(templates::account_page(&user, None, &form.username, &form.email, &errors).into_response())
}
