use axum_helpers::JwtConfig;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_required, server::ServerConfig};
use domain_users::AdminSeed;

pub use core_config::Environment;

/// Origin of the shop's web frontend during development
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_ADMIN_NAME: &str = "Administrador";

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    /// Account guaranteed to exist after start-up
    pub admin: AdminSeed,
    /// Comma-separated list of allowed browser origins
    pub cors_origins: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3001 by default
        let jwt = JwtConfig::from_env()?; // Required - will fail if not set
        let admin = admin_seed_from_env()?;
        let cors_origins = env_or_default("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ORIGIN);

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            jwt,
            admin,
            cors_origins,
        })
    }
}

/// `ADMIN_EMAIL` and `ADMIN_PASSWORD` are required, `ADMIN_NAME` is optional.
fn admin_seed_from_env() -> Result<AdminSeed, ConfigError> {
    Ok(AdminSeed {
        email: env_required("ADMIN_EMAIL")?,
        name: env_or_default("ADMIN_NAME", DEFAULT_ADMIN_NAME),
        password: env_required("ADMIN_PASSWORD")?,
    })
}
