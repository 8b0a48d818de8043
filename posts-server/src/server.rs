use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::post_service::PostService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::infrastructure::database::{create_pool, ensure_schema};
use crate::infrastructure::settings::Settings;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limits::apply_limits;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::{AppState, http_handlers};

/// A started server: owns the database pool and the task serving the listener.
pub(crate) struct RunningServer {
    pool: PgPool,
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    serve_task: JoinHandle<std::io::Result<()>>,
}

/// Connects to the database, then binds the listener. Returns once both succeeded.
pub(crate) async fn start(settings: &Settings) -> anyhow::Result<RunningServer> {
    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    start_with_pool(settings, pool).await
}

/// The pool is closed on every failure path.
async fn start_with_pool(settings: &Settings, pool: PgPool) -> anyhow::Result<RunningServer> {
    match listen(settings, &pool).await {
        Ok((local_addr, shutdown_tx, serve_task)) => {
            info!("HTTP server listening on {local_addr}");
            Ok(RunningServer {
                pool,
                local_addr,
                shutdown_tx,
                serve_task,
            })
        }
        Err(err) => {
            pool.close().await;
            Err(err)
        }
    }
}

async fn listen(
    settings: &Settings,
    pool: &PgPool,
) -> anyhow::Result<(SocketAddr, oneshot::Sender<()>, JoinHandle<std::io::Result<()>>)> {
    let repo = PostgresPostRepository::new(pool.clone());
    let state = AppState::new(Arc::new(PostService::new(Arc::new(repo))));
    let app = build_app(settings, state)?;

    ensure_schema(pool).await?;

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let serve_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    Ok((local_addr, shutdown_tx, serve_task))
}

pub(crate) fn build_app(settings: &Settings, state: AppState) -> anyhow::Result<Router> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    apply_cors(app, settings)
}

pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

impl RunningServer {
    pub(crate) fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Closes the database pool, then stops accepting connections and waits for
    /// in-flight requests. The first failure is returned.
    pub(crate) async fn stop(self) -> anyhow::Result<()> {
        self.pool.close().await;
        info!("database pool closed");

        if self.shutdown_tx.send(()).is_err() {
            error!("HTTP server task exited before shutdown was requested");
        }
        self.serve_task
            .await
            .context("HTTP server task panicked")?
            .context("HTTP server failed")?;

        info!("HTTP server on {} stopped", self.local_addr);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use sqlx::postgres::PgPoolOptions;

    use super::{build_app, start_with_pool};
    use crate::application::post_service::PostService;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;

    fn settings() -> Settings {
        Settings {
            database_url: "postgres://unused".to_string(),
            database_max_connections: 1,
            http_addr: "127.0.0.1:0".to_string(),
            cors_origins: vec!["http://localhost:8000".to_string()],
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 1024 * 1024,
            http_concurrency_limit: 8,
            http_request_timeout_secs: 5,
        }
    }

    fn state() -> AppState {
        AppState::new(Arc::new(PostService::new(Arc::new(
            InMemoryPostRepository::new(),
        ))))
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = build_app(&settings(), state()).expect("app must build");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router must not fail");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = build_app(&settings(), state()).expect("app must build");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/posts")
                    .header(header::ORIGIN, "http://localhost:8000")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router must not fail");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn build_app_rejects_invalid_cors_origin() {
        let mut settings = settings();
        settings.cors_origins = vec!["bad\norigin".to_string()];

        assert!(build_app(&settings, state()).is_err());
    }

    #[tokio::test]
    async fn failed_start_closes_the_pool() {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://posts@127.0.0.1:1/posts")
            .expect("lazy pool must build");
        let mut settings = settings();
        settings.cors_origins = vec!["bad\norigin".to_string()];

        let result = start_with_pool(&settings, pool.clone()).await;

        assert!(result.is_err());
        assert!(pool.is_closed());
    }
}
