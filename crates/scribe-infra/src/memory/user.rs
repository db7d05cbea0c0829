use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::domain::User;
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, UserRepository};

use super::InMemoryStore;

/// In-memory user repository. Emails are unique; a user who owns posts
/// cannot be deleted.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.id != entity.id && u.email == entity.email)
        {
            return Err(RepoError::Constraint(format!(
                "User '{}' already exists",
                entity.email
            )));
        }

        tables.users.insert(entity.id, entity.clone());
        tracing::debug!(user_id = %entity.id, "User saved");
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;

        let posts = tables.post_count_where(|p| p.user_id() == id);
        if posts > 0 {
            tracing::warn!(user_id = %id, posts, "Refusing to delete user with posts");
            return Err(RepoError::Constraint(format!(
                "User {id} still has {posts} post(s)"
            )));
        }

        tables
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}
