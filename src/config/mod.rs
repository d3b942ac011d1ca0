pub mod database;
pub mod email;
pub mod secret;
pub mod session;
