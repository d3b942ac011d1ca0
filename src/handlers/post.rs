use axum::{
    extract::{Path, Query},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Form,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::{CurrentUser, RequireUser};
use crate::response::{PageQuery, POSTS_PER_PAGE};
use crate::services::post::PostService;
use crate::templates;

use super::{collect_field_errors, redirect_with_flash, render_with_flash};

pub async fn home(
    Extension(db): Extension<DatabaseConnection>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let posts = PostService::new(db)
        .list_recent(query.page(), POSTS_PER_PAGE)
        .await?;

    Ok(render_with_flash(&headers, |flash| {
        templates::home_page(user.as_ref(), flash, &posts)
    }))
}

pub async fn user_posts(
    Extension(db): Extension<DatabaseConnection>,
    CurrentUser(user): CurrentUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let (author, posts) = PostService::new(db)
        .list_by_author(&username, query.page(), POSTS_PER_PAGE)
        .await?;

    Ok(render_with_flash(&headers, |flash| {
        templates::user_posts_page(user.as_ref(), flash, &author, &posts)
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
}

pub async fn new_post_page(RequireUser(user): RequireUser, headers: HeaderMap) -> Response {
    render_with_flash(&headers, |flash| {
        templates::new_post_page(&user, flash, "", "", &[])
    })
}

pub async fn new_post_form(
    Extension(db): Extension<DatabaseConnection>,
    RequireUser(user): RequireUser,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let errors = form
        .validate()
        .err()
        .map(|e| collect_field_errors(&e))
        .unwrap_or_default();

    if !errors.is_empty() {
        return Ok(
            templates::new_post_page(&user, None, &form.title, &form.content, &errors)
                .into_response(),
        );
    }

    PostService::new(db)
        .create(user.id, &form.title, &form.content)
        .await?;

    Ok(redirect_with_flash(
        "/home",
        "success",
        "Your post has been created!",
    ))
}
