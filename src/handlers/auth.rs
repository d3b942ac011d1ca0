use axum::{
    extract::{Path, Query},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::{auth::AuthService, email::EmailService, reset_token};
use crate::templates::{self, FieldError};
use crate::utils::cookie::{build_clear_cookie, build_session_cookie, extract_cookie, SESSION_COOKIE};
use crate::utils::flash::Flash;

use super::{
    collect_field_errors, redirect_with_flash, render_with_flash, sanitize_next, set_cookie_header,
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, max = 20, message = "Username must be between 2 and 20 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

pub async fn register_page(
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }
    render_with_flash(&headers, |flash| {
        templates::register_page(flash, "", "", &[])
    })
}

pub async fn register_form(
    Extension(db): Extension<DatabaseConnection>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    let mut errors = form
        .validate()
        .err()
        .map(|e| collect_field_errors(&e))
        .unwrap_or_default();

    if errors.is_empty() {
        match AuthService::new(db)
            .register(&form.username, &form.email, &form.password)
            .await
        {
            Ok(_) => {
                return Ok(redirect_with_flash(
                    "/login",
                    "success",
                    "Your account has been created! You are now able to log in",
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

    Ok(templates::register_page(None, &form.username, &form.email, &errors).into_response())
}

pub async fn login_page(
    CurrentUser(user): CurrentUser,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }
    let next = query.next.unwrap_or_default();
    render_with_flash(&headers, |flash| templates::login_page(flash, "", &next))
}

pub async fn login_form(
    Extension(db): Extension<DatabaseConnection>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    let remember = form.remember.is_some();
    match AuthService::new(db)
        .login(&form.email, &form.password, remember)
        .await
    {
        Ok((_user, session)) => {
            let target = sanitize_next(form.next.as_deref());
            let max_age = (session.expires_at - chrono::Utc::now().naive_utc()).num_seconds();
            let mut response = Redirect::to(&target).into_response();
            set_cookie_header(&mut response, &build_session_cookie(&session.id, max_age));
            Ok(response)
        }
        Err(AppError::InvalidCredentials) => {
            // Re-render the form; never reveal whether the email or the
            // password was wrong.
            let flash = Flash::new("danger", "Login Unsuccessful, Please check email and password");
            let next = form.next.unwrap_or_default();
            Ok(templates::login_page(Some(&flash), &form.email, &next).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(
    Extension(db): Extension<DatabaseConnection>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if let Some(session_id) = extract_cookie(&headers, SESSION_COOKIE) {
        AuthService::new(db).logout(&session_id).await?;
    }

    let mut response = Redirect::to("/home").into_response();
    set_cookie_header(&mut response, &build_clear_cookie(SESSION_COOKIE));
    Ok(response)
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetRequestForm {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

pub async fn reset_request_page(
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }
    render_with_flash(&headers, |flash| {
        templates::reset_request_page(flash, "", &[])
    })
}

pub async fn reset_request_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(email_service): Extension<EmailService>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ResetRequestForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    let mut errors = form
        .validate()
        .err()
        .map(|e| collect_field_errors(&e))
        .unwrap_or_default();

    if errors.is_empty() {
        match AuthService::new(db).find_by_email(&form.email).await? {
            Some(account) => {
                let token = reset_token::issue(account.id)?;
                // Mail failure must not crash the flow, but the user should
                // not be told an email is on its way when it is not.
                if let Err(e) = email_service.send_reset_email(&account.email, &token).await {
                    tracing::warn!("Failed to send password reset email: {e}");
                    return Ok(redirect_with_flash(
                        "/reset_password",
                        "warning",
                        "We could not send the reset email right now. Please try again later.",
                    ));
                }
                return Ok(redirect_with_flash(
                    "/login",
                    "info",
                    "An email has been sent with instructions to reset your password",
                ));
            }
            None => errors.push(FieldError::new(
                "email",
                "There is no account with that email. You must register first.",
            )),
        }
    }

    Ok(templates::reset_request_page(None, &form.email, &errors).into_response())
}

pub async fn reset_password_page(
    CurrentUser(user): CurrentUser,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }

    if reset_token::verify(&token).is_err() {
        return redirect_with_flash(
            "/reset_password",
            "warning",
            "That is an invalid or expired token",
        );
    }

    render_with_flash(&headers, |flash| {
        templates::reset_password_page(flash, &token, &[])
    })
}

pub async fn reset_password_form(
    Extension(db): Extension<DatabaseConnection>,
    CurrentUser(user): CurrentUser,
    Path(token): Path<String>,
    Form(form): Form<ResetPasswordForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    // Verify signature and expiry before trusting the embedded user id.
    let user_id = match reset_token::verify(&token) {
        Ok(user_id) => user_id,
        Err(_) => {
            return Ok(redirect_with_flash(
                "/reset_password",
                "warning",
                "That is an invalid or expired token",
            ));
        }
    };

    let errors = form
        .validate()
        .err()
        .map(|e| collect_field_errors(&e))
        .unwrap_or_default();

    if !errors.is_empty() {
        return Ok(templates::reset_password_page(None, &token, &errors).into_response());
    }

    AuthService::new(db)
        .reset_password(user_id, &form.password)
        .await?;

    Ok(redirect_with_flash(
        "/login",
        "success",
        "Your password has been updated! You are now able to log in",
    ))
}
