pub mod post;
pub mod session;
pub mod user;

pub use post::{Entity as Post, Model as PostModel};
pub use session::{Entity as Session, Model as SessionModel};
pub use user::{Entity as User, Model as UserModel};
