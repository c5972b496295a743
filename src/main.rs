//! Entry point: load config, wire dependencies, and run the server.

use authgate::config::Config;
use authgate::{create_app, AppState, AuthService, CredentialStore, JwtKeys};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = CredentialStore::new();
    let keys = JwtKeys::new(&config.jwt_secret, config.access_token_ttl);
    let state = AppState::new(AuthService::new(store, keys));

    let app = create_app(state);

    tracing::info!(
        addr = %config.server_addr,
        token_ttl_secs = config.access_token_ttl.num_seconds(),
        "listening"
    );
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
