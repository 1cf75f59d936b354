use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use tb_api::{create_app, telemetry, AppState};
use tb_core::repositories::{RefreshTokenRepository, UserRepository};
use tb_core::services::{AuthGateway, TokenServiceConfig};
use tb_infra::database::{DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository};
use tb_infra::{InMemoryRefreshTokenRepository, InMemoryUserRepository, PasswordHasher};
use tb_shared::AppConfig;

type DynTokens = Arc<dyn RefreshTokenRepository>;
type DynUsers = Arc<dyn UserRepository>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Tweetbook identity API");
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using the development signing secret; set TB__AUTH__JWT__SECRET");
    }

    let (gateway, pool) = build_gateway(&config).await?;
    let mut state = AppState::new(Arc::new(gateway), config.server.request_timeout())
        .with_cors(config.environment, config.server.cors.clone());
    if let Some(pool) = &pool {
        state = state.with_database(pool.clone());
    }
    let state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}

async fn build_gateway(
    config: &AppConfig,
) -> anyhow::Result<(AuthGateway<DynTokens, DynUsers>, Option<DatabasePool>)> {
    let token_config =
        TokenServiceConfig::from_jwt_config(&config.auth.jwt).context("invalid token settings")?;

    let (tokens, users, pool): (DynTokens, DynUsers, _) = if config.database.is_configured() {
        let pool = DatabasePool::new(&config.database).await?;
        pool.run_migrations().await?;
        tracing::info!(stats = %pool.get_statistics(), "Using MySQL stores");

        (
            Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone())),
            Arc::new(MySqlUserRepository::new(pool.get_pool().clone(), PasswordHasher::default())),
            Some(pool),
        )
    } else {
        tracing::warn!("database.url is not set; using in-memory stores");
        (
            Arc::new(InMemoryRefreshTokenRepository::new()),
            Arc::new(InMemoryUserRepository::default()),
            None,
        )
    };

    let gateway = AuthGateway::new(Arc::new(users), Arc::new(tokens), token_config);
    Ok((gateway, pool))
}
