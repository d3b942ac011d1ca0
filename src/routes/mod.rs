use crate::handlers;
use crate::middleware::session::load_session;
use axum::{middleware, routing, Router};

/// Explicit route table: every path maps to one handler, with session
/// resolution applied to the whole surface.
pub fn create_routes() -> Router {
    Router::new()
        .route("/", routing::get(handlers::post::home))
        .route("/home", routing::get(handlers::post::home))
        .route("/about", routing::get(handlers::pages::about))
        .route(
            "/register",
            routing::get(handlers::auth::register_page).post(handlers::auth::register_form),
        )
        .route(
            "/login",
            routing::get(handlers::auth::login_page).post(handlers::auth::login_form),
        )
        .route("/logout", routing::get(handlers::auth::logout))
        .route(
            "/account",
            routing::get(handlers::account::account_page).post(handlers::account::account_form),
        )
        .route("/user/{username}", routing::get(handlers::post::user_posts))
        .route(
            "/post/new",
            routing::get(handlers::post::new_post_page).post(handlers::post::new_post_form),
        )
        .route(
            "/reset_password",
            routing::get(handlers::auth::reset_request_page)
                .post(handlers::auth::reset_request_form),
        )
        .route(
            "/reset_password/{token}",
            routing::get(handlers::auth::reset_password_page)
                .post(handlers::auth::reset_password_form),
        )
        .layer(middleware::from_fn(load_session))
}
