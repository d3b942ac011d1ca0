use axum::{http::HeaderMap, response::Response};

use crate::middleware::CurrentUser;
use crate::templates;

use super::render_with_flash;

pub async fn about(CurrentUser(user): CurrentUser, headers: HeaderMap) -> Response {
    render_with_flash(&headers, |flash| {
        templates::about_page(user.as_ref(), flash)
    })
}
