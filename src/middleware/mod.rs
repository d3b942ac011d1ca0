pub mod session;

pub use session::{CurrentUser, RequireUser};
