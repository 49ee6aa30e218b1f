//! Liveness and readiness probes for the clinic service.

use axum::{extract::State, response::Response, routing::get};
use serde::Serialize;

use super::{format, Routes};
use crate::{app::AppContext, Result};

/// Body of every probe response, `{"ok": true}` when healthy.
#[derive(Serialize)]
pub struct Health {
    pub ok: bool,
}

/// # Errors
/// Never fails; the process answering is the whole check.
pub async fn ping() -> Result<Response> {
    format::json(Health { ok: true })
}

/// # Errors
/// Never fails.
pub async fn health() -> Result<Response> {
    format::json(Health { ok: true })
}

/// Reports whether the clinic database accepts connections.
///
/// A failed ping is logged and answered with `ok: false` rather than an error
/// status.
///
/// # Errors
/// Only fails when the response cannot be serialized.
pub async fn readiness(State(ctx): State<AppContext>) -> Result<Response> {
    let ok = match ctx.db.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(err.msg = %err, err.detail = ?err, "readiness_db_ping_error");
            false
        }
    };
    format::json(Health { ok })
}

pub fn routes() -> Routes {
    Routes::new()
        .add("/_ping", get(ping))
        .add("/_health", get(health))
        .add("/_readiness", get(readiness))
}
