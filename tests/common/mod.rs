#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::SqlitePool;
use std::sync::Arc;
use url_shortener::application::services::{DynLinkService, LinkService};
use url_shortener::domain::repositories::LinkRepository;
use url_shortener::infrastructure::database;
use url_shortener::infrastructure::persistence::SqliteLinkRepository;
use url_shortener::routes::router;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Fresh, migrated in-memory database.
pub async fn test_pool() -> SqlitePool {
    database::connect_in_memory().await.unwrap()
}

pub fn create_link_service(pool: SqlitePool) -> Arc<DynLinkService> {
    let link_repository: Arc<dyn LinkRepository> =
        Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let code_generator: Arc<dyn CodeGenerator> = Arc::new(RandomCodeGenerator);

    Arc::new(LinkService::new(link_repository, code_generator))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(create_link_service(pool), None)
}

/// Every route and the tracing layer on top of `pool`.
pub fn make_server(pool: SqlitePool) -> TestServer {
    TestServer::new(router(create_test_state(pool))).unwrap()
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (code, target_url) VALUES (?, ?) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn get_clicks(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn is_base62(code: &str, len: usize) -> bool {
    code.len() == len && code.chars().all(|c| c.is_ascii_alphanumeric())
}
