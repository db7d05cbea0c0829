use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, User};
use crate::error::RepoError;

/// Storage for one entity type, keyed by id.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert or replace by id.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Fails with [`RepoError::NotFound`] for an unknown id.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// `save` must fail with [`RepoError::ForeignKey`] when the post's category or
/// user does not exist.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Category repository. `delete` must fail with [`RepoError::Constraint`]
/// while any post still belongs to the category.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;
}

/// Repository for post authors. `delete` must fail with
/// [`RepoError::Constraint`] while the user still owns posts.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
