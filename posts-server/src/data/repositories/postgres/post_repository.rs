use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_first_name: String,
    author_last_name: String,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author_first_name, author_last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_first_name, author_last_name
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.author.first_name)
        .bind(input.author.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                author_first_name,
                author_last_name
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let (first_name, last_name) = match patch.author {
            Some(author) => (Some(author.first_name), Some(author.last_name)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                author_first_name = COALESCE($4, author_first_name),
                author_last_name = COALESCE($5, author_last_name)
            WHERE id = $1
            RETURNING id, title, content, author_first_name, author_last_name
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                author_first_name,
                author_last_name
            FROM posts
            ORDER BY id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let author = Author::new(row.author_first_name, row.author_last_name)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Post::new(row.id, row.title, row.content, author)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
