use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use super::shutdown::shutdown_signal;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Cross-cutting settings applied by [`create_router`].
#[derive(Clone, Debug)]
pub struct RouterOptions {
    /// Comma-separated list of allowed browser origins
    pub cors_origins: String,
    pub request_timeout: Duration,
}

/// Starts the server and serves until SIGINT/SIGTERM, letting in-flight
/// requests finish.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Wraps the API routes with docs and middleware.
///
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - Tracing, request timeout, security headers, CORS, compression
/// - JSON 404 fallback
///
/// # Errors
/// Fails when the CORS origin list is empty or malformed.
pub fn create_router<T>(apis: Router, options: &RouterOptions) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(&options.cors_origins)?;
    info!("CORS configured with allowed origins: {}", options.cors_origins);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}
