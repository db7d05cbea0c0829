use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::validation::{PostCandidate, ValidPost};

/// Post entity - a user-authored post in one category.
///
/// Content can only come from a [`ValidPost`], so a stored post always
/// satisfies the validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    id: Uuid,
    category_id: Uuid,
    user_id: Uuid,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and timestamps.
    pub fn new(valid: ValidPost) -> Self {
        let (title, body, category_id, user_id) = valid.into_parts();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id,
            user_id,
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content, keeping identity and creation time.
    pub fn revise(&mut self, valid: ValidPost) {
        let (title, body, category_id, user_id) = valid.into_parts();
        self.title = title;
        self.body = body;
        self.category_id = category_id;
        self.user_id = user_id;
        self.updated_at = Utc::now();
    }

    /// Current content as an unchecked candidate, e.g. as the base of an edit.
    pub fn to_candidate(&self) -> PostCandidate {
        PostCandidate {
            title: self.title.clone(),
            body: self.body.clone(),
            category_id: Some(self.category_id),
            user_id: Some(self.user_id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(title: &str) -> ValidPost {
        PostCandidate::new(title, "body")
            .with_category(Uuid::new_v4())
            .with_user(Uuid::new_v4())
            .validate()
            .unwrap()
    }

    #[test]
    fn test_new_post_copies_valid_content() {
        let input = valid("First");
        let post = Post::new(input.clone());

        assert_eq!(post.title(), "First");
        assert_eq!(post.category_id(), input.category_id());
        assert_eq!(post.user_id(), input.user_id());
        assert_eq!(post.created_at(), post.updated_at());
    }

    #[test]
    fn test_revise_keeps_identity() {
        let mut post = Post::new(valid("First"));
        let id = post.id();
        let created_at = post.created_at();

        post.revise(valid("Second"));

        assert_eq!(post.id(), id);
        assert_eq!(post.created_at(), created_at);
        assert_eq!(post.title(), "Second");
        assert!(post.updated_at() >= created_at);
    }

    #[test]
    fn test_to_candidate_revalidates() {
        let post = Post::new(valid("First"));
        let mut edit = post.to_candidate();
        edit.title.clear();

        assert!(post.to_candidate().validate().is_ok());
        assert!(edit.validate().is_err());
    }
}
