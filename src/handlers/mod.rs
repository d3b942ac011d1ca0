pub mod account;
pub mod auth;
pub mod pages;
pub mod post;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::templates::FieldError;
use crate::utils::flash::{clear_flash, peek_flash, set_flash, Flash};

/// Render a page, feeding it the pending flash notice (if any) and clearing
/// the flash cookie so the notice shows only once.
pub(crate) fn render_with_flash<F>(headers: &HeaderMap, render: F) -> Response
where
    F: FnOnce(Option<&Flash>) -> Html<String>,
{
    let flash = peek_flash(headers);
    let mut response = render(flash.as_ref()).into_response();
    if flash.is_some() {
        clear_flash(&mut response);
    }
    response
}

/// Redirect and queue a flash notice for the landing page.
pub(crate) fn redirect_with_flash(to: &str, category: &str, message: &str) -> Response {
    let mut response = Redirect::to(to).into_response();
    set_flash(&mut response, &Flash::new(category, message));
    response
}

/// Attach a Set-Cookie header to a response.
pub(crate) fn set_cookie_header(response: &mut Response, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Flatten validator's error map into renderable field errors.
pub(crate) fn collect_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {field}"));
            out.push(FieldError::new(field.to_string(), message));
        }
    }
    out
}

/// Only honor local redirect targets; anything else falls back to /home.
pub(crate) fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/home".to_string(),
    }
}
