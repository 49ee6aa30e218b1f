//! Application boot: context creation, schema preparation and the HTTP server.

use std::sync::Arc;

use axum::Router;

use crate::{
    app::AppContext,
    clinic::ClinicService,
    config::Config,
    controller, db,
    environment::Environment,
    views::TeraView,
    Result,
};

/// Connects to the database and prepares it as the configuration asks.
///
/// # Errors
/// Returns an error when the database is unreachable or a schema step fails.
pub async fn create_context(environment: &Environment, config: Config) -> Result<AppContext> {
    let db = db::connect(&config.database).await?;

    if config.database.dangerously_recreate {
        tracing::warn!("recreating schema");
        db::reset(&db).await?;
    }
    if config.database.auto_migrate {
        db::migrate(&db).await?;
    }
    if config.database.dangerously_truncate {
        tracing::warn!("truncating tables");
        db::truncate(&db).await?;
    }

    let clinic = ClinicService::from_connection(&db);
    let views = Arc::new(TeraView::build()?);
    Ok(AppContext {
        environment: environment.clone(),
        db,
        config,
        clinic,
        views,
    })
}

/// Builds the router serving every controller.
#[must_use]
pub fn router(ctx: &AppContext) -> Router {
    controller::to_router(ctx.clone(), controller::app_routes())
}

/// Serves the application until Ctrl-C is received.
///
/// # Errors
/// Returns an error when the listener cannot be bound.
pub async fn start(ctx: AppContext, binding: &str, port: i32) -> Result<()> {
    let router = router(&ctx);
    let listener = tokio::net::TcpListener::bind(format!("{binding}:{port}")).await?;
    tracing::info!(
        environment = %ctx.environment,
        address = %listener.local_addr()?,
        "listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
