use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Category, Post, User};

/// A stored post plus its insertion sequence, used to order posts created
/// within the same clock tick.
pub(super) struct PostRow {
    pub(super) seq: u64,
    pub(super) post: Post,
}

#[derive(Default)]
pub(super) struct Tables {
    pub(super) categories: HashMap<Uuid, Category>,
    pub(super) users: HashMap<Uuid, User>,
    pub(super) posts: HashMap<Uuid, PostRow>,
    pub(super) next_seq: u64,
}

impl Tables {
    pub(super) fn post_count_where(&self, keep: impl Fn(&Post) -> bool) -> usize {
        self.posts.values().filter(|row| keep(&row.post)).count()
    }
}

/// Shared backing store for the in-memory repositories.
///
/// All tables sit behind one lock, so reference checks and the write they
/// guard happen atomically. Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    pub(super) tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
