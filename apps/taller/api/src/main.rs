use axum_helpers::server::{RouterOptions, create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let state = AppState::new(config);

    // Users live in memory, so the admin account is recreated on every start
    state
        .users
        .seed_admin(state.config.admin.clone())
        .await
        .map_err(|e| eyre::eyre!("Failed to seed admin account: {}", e))?;

    let api_routes = api::routes(&state);

    let options = RouterOptions {
        cors_origins: state.config.cors_origins.clone(),
        request_timeout: state.config.server.request_timeout,
    };
    let router = create_router::<openapi::ApiDoc>(api_routes, &options)?;

    // /health: liveness check with app name/version
    let app = router.merge(health_router(state.config.app));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting Taller Franco API"
    );

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Taller Franco API shutdown complete");
    Ok(())
}
