use crate::{
    error::AppError,
    models::UserModel,
    services::auth::AuthService,
    utils::cookie::{extract_cookie, SESSION_COOKIE},
};
use axum::{
    extract::{FromRequestParts, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};
use sea_orm::DatabaseConnection;

/// The user resolved from the session cookie, if any. Inserted into request
/// extensions for every route by `load_session`.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<UserModel>);

/// Session resolution middleware.
///
/// Reads the session cookie, resolves it to a user through the sessions
/// table, and makes the result available to handlers. Absent, unknown, and
/// expired sessions all resolve to an anonymous request; they are never an
/// error here.
pub async fn load_session(
    Extension(db): Extension<DatabaseConnection>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current = match extract_cookie(&headers, SESSION_COOKIE) {
        Some(session_id) => CurrentUser(AuthService::new(db).current_user(&session_id).await?),
        None => CurrentUser(None),
    };

    request.extensions_mut().insert(current);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("load_session middleware missing")))
    }
}

/// Extractor for routes that require a logged-in identity.
///
/// Anonymous access is rejected with a redirect to the login page carrying
/// the originally requested path, so a successful login lands back where the
/// user was headed.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserModel);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        match user {
            Some(user) => Ok(RequireUser(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| "/".to_string());
                Err(AppError::Unauthorized { next })
            }
        }
    }
}
