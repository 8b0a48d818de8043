use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub(crate) async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Creates the `posts` table when it is missing. Existing tables are left as they are.
pub(crate) async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL CHECK (title <> ''),
            content TEXT NOT NULL CHECK (content <> ''),
            author_first_name TEXT NOT NULL CHECK (author_first_name <> ''),
            author_last_name TEXT NOT NULL CHECK (author_last_name <> '')
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create posts table")?;

    Ok(())
}
