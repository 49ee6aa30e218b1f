use axum_test::TestServer;

use super::config::test_config;
use crate::{app::AppContext, boot, db, environment::Environment};

/// Returns a context over a freshly migrated, empty database.
///
/// # Panics
/// Panics when the in-memory database cannot be created.
pub async fn get_app_context() -> AppContext {
    boot::create_context(&Environment::Test, test_config())
        .await
        .expect("create test context")
}

/// Returns a context whose database holds the bundled fixtures.
///
/// # Panics
/// Panics when the fixtures cannot be loaded.
pub async fn seeded_app_context() -> AppContext {
    let ctx = get_app_context().await;
    let fixtures = db::Fixtures::bundled().expect("bundled fixtures");
    db::seed(&ctx.db, &fixtures).await.expect("seed");
    ctx
}

/// Serves the application router for request level tests.
///
/// # Panics
/// Panics when the test server cannot start.
pub fn test_server(ctx: &AppContext) -> TestServer {
    TestServer::new(boot::router(ctx)).expect("start test server")
}
