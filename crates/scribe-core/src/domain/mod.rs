//! Domain entities - the core business objects.

mod category;
mod post;
mod user;

pub mod validation;

pub use category::Category;
pub use post::Post;
pub use user::User;
pub use validation::{PostCandidate, ValidPost};
