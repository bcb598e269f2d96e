use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use like_service::config::AppConfig;
use like_service::database::client::Database;
use like_service::init;
use like_service::middleware::error::{AppError, AppResult};
use like_service::middleware::mw_ctx::create_ctx_state;
use like_service::utils::auth_gateway::AuthGateway;
use tracing::info;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let db = Database::connect(config.db_config()).await?;
    let auth = Arc::new(AuthGateway::new(&config.auth_service_url));

    let ctx_state = create_ctx_state(db, auth);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Generic {
            description: format!("can't bind {addr} - {e}"),
        })?;

    axum::serve(listener, routes_all.into_make_service())
        .await
        .map_err(|e| AppError::Generic {
            description: e.to_string(),
        })?;

    Ok(())
}
