pub mod cookie;
pub mod flash;
pub mod password;

pub use password::{hash_password, verify_password};
