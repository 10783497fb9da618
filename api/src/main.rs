use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ta_api::app::create_app;
use ta_api::routes::auth::AppState;

use ta_core::services::auth::{AuthService, AuthServiceConfig};
use ta_core::services::token::{
    AccessTokenIssuer, Hs256Signer, RefreshTokenIssuer, Rs256KeyManager, Rs256Signer,
    SessionCleanupConfig, SessionCleanupService, SessionTokenIssuer, TimeOrderedIdGenerator,
    TokenServiceConfig,
};
use ta_infra::cache::RevocationStore;
use ta_infra::database::{migrations, DatabasePool, SqliteSessionRepository, SqliteUserRepository};
use ta_infra::security::BcryptPasswordHasher;
use ta_shared::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting todoapp auth service");
    config.validate().context("invalid configuration")?;

    // Storage
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to open the database")?;
    migrations::run(pool.get_pool())
        .await
        .context("failed to run migrations")?;

    let index = Arc::new(
        RevocationStore::connect(&config.cache)
            .await
            .context("failed to connect to the revocation index")?,
    );
    if !index.health_check().await.unwrap_or(false) {
        warn!("Revocation index did not answer the health check");
    }

    let users = Arc::new(SqliteUserRepository::new(pool.get_pool().clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool.get_pool().clone()));

    // Signing keys
    let tokens = &config.tokens;
    let access_keys = Rs256KeyManager::from_base64_pem(
        "access",
        &tokens.access_private_key,
        &tokens.access_public_key,
    )
    .context("invalid access token key material")?;
    let refresh_keys = Rs256KeyManager::from_base64_pem(
        "refresh",
        &tokens.refresh_private_key,
        &tokens.refresh_public_key,
    )
    .context("invalid refresh token key material")?;

    let token_config = TokenServiceConfig::from_token_config(tokens);
    let ids = Arc::new(TimeOrderedIdGenerator);

    let refresh_tokens = RefreshTokenIssuer::new(
        Arc::new(Rs256Signer::new(refresh_keys)),
        sessions.clone(),
        index.clone(),
        ids.clone(),
        token_config.clone(),
    );
    let access_tokens = AccessTokenIssuer::new(
        Arc::new(Rs256Signer::new(access_keys)),
        index,
        token_config.clone(),
    );
    let session_tokens = SessionTokenIssuer::new(
        Arc::new(Hs256Signer::new(&tokens.session_secret)),
        ids,
        token_config,
    );

    let auth_service = AuthService::new(
        users,
        Arc::new(BcryptPasswordHasher::default()),
        Arc::new(refresh_tokens),
        Arc::new(access_tokens),
        Arc::new(session_tokens),
        AuthServiceConfig::from_server_config(&config.server),
    );

    Arc::new(SessionCleanupService::new(
        sessions,
        SessionCleanupConfig {
            interval_seconds: tokens.cleanup_interval,
            enabled: tokens.cleanup_enabled,
        },
    ))
    .start_background_task();

    let app_state = web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped, closing the database pool");
    pool.close().await;
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
