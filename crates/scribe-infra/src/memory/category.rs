use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::domain::Category;
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, CategoryRepository};

use super::InMemoryStore;

/// In-memory category repository. Names are unique; a category with posts
/// cannot be deleted.
pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables
            .categories
            .values()
            .any(|c| c.id != entity.id && c.name == entity.name)
        {
            return Err(RepoError::Constraint(format!(
                "Category '{}' already exists",
                entity.name
            )));
        }

        tables.categories.insert(entity.id, entity.clone());
        tracing::debug!(category_id = %entity.id, "Category saved");
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;

        let posts = tables.post_count_where(|p| p.category_id() == id);
        if posts > 0 {
            tracing::warn!(category_id = %id, posts, "Refusing to delete category with posts");
            return Err(RepoError::Constraint(format!(
                "Category {id} still has {posts} post(s)"
            )));
        }

        tables
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }
}
