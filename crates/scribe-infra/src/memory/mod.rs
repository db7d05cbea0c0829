//! In-memory repositories over a shared [`InMemoryStore`].

mod category;
mod post;
mod store;
mod user;

pub use category::InMemoryCategoryRepository;
pub use post::InMemoryPostRepository;
pub use store::InMemoryStore;
pub use user::InMemoryUserRepository;
