//! Domain entities - the core business objects.

mod follow;
mod page;
mod post;
mod user;

pub use follow::Follow;
pub use page::{Page, PageRequest};
pub use post::{AuthoredPost, MAX_POST_LENGTH, Post};
pub use user::{MAX_ABOUT_ME_LENGTH, User};
