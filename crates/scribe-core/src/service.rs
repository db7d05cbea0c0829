//! Post lifecycle - validate before every write, then hand off to storage.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostCandidate};
use crate::error::DomainError;
use crate::ports::PostRepository;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Validate and store a new post.
    pub async fn create(&self, candidate: PostCandidate) -> Result<Post, DomainError> {
        let valid = candidate.validate().inspect_err(|errors| {
            tracing::info!(fields = ?errors.fields(), "Rejected post candidate");
        })?;

        let post = self.posts.save(Post::new(valid)).await?;
        tracing::debug!(post_id = %post.id(), user_id = %post.user_id(), "Post created");
        Ok(post)
    }

    /// Replace a stored post's content after validating the new candidate.
    pub async fn update(&self, id: Uuid, candidate: PostCandidate) -> Result<Post, DomainError> {
        let mut post = self.find(id).await?;

        let valid = candidate.validate().inspect_err(|errors| {
            tracing::info!(post_id = %id, fields = ?errors.fields(), "Rejected post update");
        })?;
        post.revise(valid);

        let post = self.posts.save(post).await?;
        tracing::debug!(post_id = %post.id(), "Post updated");
        Ok(post)
    }

    /// Deletion has no validation step.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await?;
        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_user_id(user_id).await?)
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_category_id(category_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::validation::{Field, FieldErrorKind};
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Records saves without enforcing any integrity rules.
    #[derive(Default)]
    struct RecordingRepository {
        saved: Mutex<Vec<Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for RecordingRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            let saved = self.saved.lock().unwrap();
            Ok(saved.iter().rev().find(|p| p.id() == id).cloned())
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            self.saved.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepository {
        async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_category_id(&self, _category_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn candidate(title: &str) -> PostCandidate {
        PostCandidate::new(title, "body")
            .with_category(Uuid::new_v4())
            .with_user(Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_invalid_candidate_never_reaches_storage() {
        let repo = Arc::new(RecordingRepository::default());
        let service = PostService::new(repo.clone());

        let err = service.create(PostCandidate::new("", "")).await.unwrap_err();

        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 4),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_revalidates() {
        let repo = Arc::new(RecordingRepository::default());
        let service = PostService::new(repo.clone());
        let post = service.create(candidate("Hello")).await.unwrap();

        let mut edit = post.to_candidate();
        edit.title = "x".repeat(141);
        let err = service.update(post.id(), edit).await.unwrap_err();

        match err {
            DomainError::Validation(errors) => {
                assert!(errors.contains(Field::Title, FieldErrorKind::TooLong))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let service = PostService::new(Arc::new(RecordingRepository::default()));
        let err = service
            .update(Uuid::new_v4(), candidate("Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
    }
}
