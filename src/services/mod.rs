pub mod auth;
pub mod email;
pub mod post;
pub mod reset_token;
pub mod user;
