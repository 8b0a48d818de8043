use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Default)]
struct Store {
    next_id: i64,
    posts: BTreeMap<i64, Post>,
    writes: usize,
}

/// Test double backed by a `BTreeMap`; clones share the same store.
#[derive(Clone, Default)]
pub(crate) struct InMemoryPostRepository {
    store: Arc<Mutex<Store>>,
    broken: bool,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `DomainError::Unexpected`, as an unreachable database would.
    pub(crate) fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Number of create/update/delete calls that reached the store.
    pub(crate) fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("in-memory store mutex poisoned")
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.broken {
            return Err(DomainError::Unexpected("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        self.check_available()?;
        let mut store = self.lock();
        store.writes += 1;
        store.next_id += 1;

        let post = Post::new(store.next_id, input.title, input.content, input.author)?;
        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.check_available()?;
        Ok(self.lock().posts.get(&id).cloned())
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        self.check_available()?;
        let mut store = self.lock();
        store.writes += 1;

        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(author) = patch.author {
            post.author = author;
        }
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut store = self.lock();
        store.writes += 1;
        Ok(store.posts.remove(&id).is_some())
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<Post>, DomainError> {
        self.check_available()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.lock().posts.values().take(limit).cloned().collect())
    }
}
