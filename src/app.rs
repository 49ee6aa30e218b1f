//! Shared state handed to every controller.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{clinic::ClinicService, config::Config, environment::Environment, views::TeraView};

/// Cloneable application context.
///
/// `db` is a pooled connection, so clones share the same pool.
#[derive(Clone)]
pub struct AppContext {
    /// The environment in which the application is running.
    pub environment: Environment,
    pub db: DatabaseConnection,
    pub config: Config,
    /// Validating boundary for veterinarian records.
    pub clinic: ClinicService,
    /// Page templates, compiled once at boot.
    pub views: Arc<TeraView>,
}
