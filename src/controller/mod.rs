//! HTTP controllers.
//!
//! Each controller exposes a `routes()` function returning [`Routes`]; the
//! boot sequence collects them into one axum [`Router`].

use std::collections::BTreeMap;

use axum::{
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{app::AppContext, clinic::ClinicServiceError, Error};

pub mod format;
pub mod monitoring;
pub mod vets;

pub use axum::Json;

/// A group of handlers sharing a URI prefix.
#[derive(Clone, Default)]
pub struct Routes {
    pub prefix: Option<String>,
    pub handlers: Vec<Handler>,
}

#[derive(Clone)]
pub struct Handler {
    pub uri: String,
    pub method: MethodRouter<AppContext>,
}

impl Routes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a prefix prepended to every handler URI of this group.
    #[must_use]
    pub fn prefix(mut self, uri: &str) -> Self {
        self.prefix = Some(uri.to_owned());
        self
    }

    #[must_use]
    pub fn add(mut self, uri: &str, method: MethodRouter<AppContext>) -> Self {
        self.handlers.push(Handler {
            uri: uri.to_owned(),
            method,
        });
        self
    }

    /// Full URIs served by this group.
    #[must_use]
    pub fn uris(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|handler| join_uri(self.prefix.as_deref(), &handler.uri))
            .collect()
    }
}

fn join_uri(prefix: Option<&str>, uri: &str) -> String {
    match prefix {
        None => uri.to_string(),
        Some(prefix) if uri.is_empty() || uri == "/" => prefix.to_string(),
        // extension routes such as `.json` attach to the prefix itself
        Some(prefix) if uri.starts_with('.') => format!("{}{uri}", prefix.trim_end_matches('/')),
        Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), uri.trim_start_matches('/')),
    }
}

/// Every route group of the application.
#[must_use]
pub fn app_routes() -> Vec<Routes> {
    vec![monitoring::routes(), vets::routes()]
}

/// Builds the axum router for the given route groups.
pub fn to_router(ctx: AppContext, groups: Vec<Routes>) -> Router {
    let mut router = Router::new();
    for group in groups {
        for (uri, handler) in group.uris().into_iter().zip(group.handlers) {
            tracing::debug!(uri = %uri, "route_registered");
            router = router.route(&uri, handler.method);
        }
    }
    router.layer(TraceLayer::new_for_http()).with_state(ctx)
}

/// JSON body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorDetail {
    #[must_use]
    pub fn new<T: Into<String>>(error: T, description: T) -> Self {
        Self {
            error: Some(error.into()),
            description: Some(description.into()),
            errors: None,
        }
    }
}

fn validation_detail(errors: &crate::clinic::VetValidationErrors) -> ErrorDetail {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for error in errors.errors() {
        fields
            .entry(error.field().to_string())
            .or_default()
            .push(error.to_string());
    }
    ErrorDetail {
        error: Some("validation_error".to_string()),
        description: Some(errors.to_string()),
        errors: Some(fields),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            Self::NotFound | Self::Clinic(ClinicServiceError::VetNotFound { .. }) => {
                ErrorDetail::new("not_found", "Resource was not found")
            }
            Self::JsonRejection(rejection) => {
                ErrorDetail::new("invalid_request".to_string(), rejection.body_text())
            }
            Self::Clinic(ClinicServiceError::Invalid(errors)) => validation_detail(errors),
            Self::Clinic(
                err @ (ClinicServiceError::UnknownSpecialty { .. } | ClinicServiceError::NotPersisted),
            ) => ErrorDetail::new("bad_request".to_string(), err.to_string()),
            Self::Clinic(err @ ClinicServiceError::AlreadyPersisted { .. }) => {
                ErrorDetail::new("conflict".to_string(), err.to_string())
            }
            _ => {
                tracing::error!(error.msg = %self, error.details = ?self, "controller_error");
                ErrorDetail::new("internal_server_error", "Internal Server Error")
            }
        };
        (status, Json(detail)).into_response()
    }
}
