use std::sync::Arc;

use tracing::debug;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    /// Upper bound on the number of posts returned by `list_posts`.
    pub(crate) const LIST_LIMIT: i64 = 10;

    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts(Self::LIST_LIMIT).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            author: req.author,
        };
        let post = self.repo.create_post(new_post).await?;
        debug!(post_id = post.id, "post created");
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            content: req.content,
            author: req.author,
        };
        self.repo
            .update_post(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    /// Deleting an id that does not exist is not an error.
    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        let deleted = self.repo.delete_post(id).await?;
        if !deleted {
            debug!(post_id = id, "delete requested for missing post");
        }
        Ok(())
    }
}
