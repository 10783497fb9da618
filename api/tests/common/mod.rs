//! Test application wired to in-memory SQLite and the in-process index

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;

use ta_api::routes::auth::AppState;
use ta_core::services::auth::{AuthService, AuthServiceConfig};
use ta_core::services::token::{
    AccessTokenIssuer, Hs256Signer, RefreshTokenIssuer, Rs256KeyManager, Rs256Signer,
    SessionTokenIssuer, TimeOrderedIdGenerator, TokenServiceConfig,
};
use ta_infra::cache::{MemoryRevocationIndex, RevocationStore};
use ta_infra::database::{migrations, DatabasePool, SqliteSessionRepository, SqliteUserRepository};
use ta_infra::security::BcryptPasswordHasher;
use ta_shared::config::DatabaseConfig;

const ACCESS_PRIVATE_PEM: &str = include_str!("../../../core/keys/testing/access_private.pem");
const ACCESS_PUBLIC_PEM: &str = include_str!("../../../core/keys/testing/access_public.pem");
const REFRESH_PRIVATE_PEM: &str = include_str!("../../../core/keys/testing/refresh_private.pem");
const REFRESH_PUBLIC_PEM: &str = include_str!("../../../core/keys/testing/refresh_public.pem");

pub type TestState = AppState<
    SqliteUserRepository,
    SqliteSessionRepository,
    RevocationStore,
    BcryptPasswordHasher,
>;

pub async fn app_state() -> web::Data<TestState> {
    let pool = DatabasePool::new(DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory database");
    migrations::run(pool.get_pool()).await.expect("migrations");

    let users = Arc::new(SqliteUserRepository::new(pool.get_pool().clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool.get_pool().clone()));
    let index = Arc::new(RevocationStore::Memory(MemoryRevocationIndex::new()));
    let ids = Arc::new(TimeOrderedIdGenerator);
    let config = TokenServiceConfig {
        access_lifetime: Duration::minutes(15),
        refresh_lifetime: Duration::days(30),
        session_lifetime: Duration::days(30),
    };

    let access_keys =
        Rs256KeyManager::from_pem_strings("access", ACCESS_PRIVATE_PEM, ACCESS_PUBLIC_PEM)
            .expect("access keys");
    let refresh_keys =
        Rs256KeyManager::from_pem_strings("refresh", REFRESH_PRIVATE_PEM, REFRESH_PUBLIC_PEM)
            .expect("refresh keys");

    let refresh = RefreshTokenIssuer::new(
        Arc::new(Rs256Signer::new(refresh_keys)),
        sessions,
        index.clone(),
        ids.clone(),
        config.clone(),
    );
    let access = AccessTokenIssuer::new(Arc::new(Rs256Signer::new(access_keys)), index, config.clone());
    let session = SessionTokenIssuer::new(Arc::new(Hs256Signer::new("api-test-secret")), ids, config);

    let auth_service = AuthService::new(
        users,
        Arc::new(BcryptPasswordHasher::new(4).expect("bcrypt cost")),
        Arc::new(refresh),
        Arc::new(access),
        Arc::new(session),
        AuthServiceConfig::default(),
    );

    web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
    })
}

pub fn alice() -> serde_json::Value {
    serde_json::json!({
        "email": "alice@example.com",
        "username": "alice",
        "name": "Alice Liddell",
        "password": "P@ssw0rd1"
    })
}
