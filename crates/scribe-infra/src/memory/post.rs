use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository};

use super::InMemoryStore;
use super::store::{PostRow, Tables};

/// In-memory post repository.
///
/// Saves fail with [`RepoError::ForeignKey`] when the post's category or user
/// is missing. The check and the insert run under the same write lock.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    async fn filtered(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let tables = self.store.tables.read().await;
        let mut rows: Vec<&PostRow> = tables.posts.values().filter(|r| keep(&r.post)).collect();
        rows.sort_by_key(|r| (r.post.created_at(), r.seq));
        rows.into_iter().map(|r| r.post.clone()).collect()
    }
}

fn check_references(tables: &Tables, post: &Post) -> Result<(), RepoError> {
    if !tables.categories.contains_key(&post.category_id()) {
        tracing::warn!(post_id = %post.id(), category_id = %post.category_id(), "Post references missing category");
        return Err(RepoError::ForeignKey {
            relation: "category",
            id: post.category_id(),
        });
    }
    if !tables.users.contains_key(&post.user_id()) {
        tracing::warn!(post_id = %post.id(), user_id = %post.user_id(), "Post references missing user");
        return Err(RepoError::ForeignKey {
            relation: "user",
            id: post.user_id(),
        });
    }
    Ok(())
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).map(|r| r.post.clone()))
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        check_references(&tables, &entity)?;

        let existing = tables.posts.get(&entity.id()).map(|row| row.seq);
        let seq = match existing {
            Some(seq) => seq,
            None => {
                tables.next_seq += 1;
                tables.next_seq
            }
        };
        tables.posts.insert(
            entity.id(),
            PostRow {
                seq,
                post: entity.clone(),
            },
        );
        tracing::debug!(post_id = %entity.id(), "Post saved");
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.filtered(|p| p.user_id() == user_id).await)
    }

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.filtered(|p| p.category_id() == category_id).await)
    }
}
