//! # Application Error Handling

use axum::{extract::rejection::JsonRejection, http::StatusCode};

use crate::clinic::ClinicServiceError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Clinic(#[from] ClinicServiceError),

    #[error(transparent)]
    DB(#[from] sea_orm::DbErr),

    #[error("cannot parse `{1}`: {0}")]
    YAMLFile(#[source] serde_yaml::Error, String),

    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),

    #[error(transparent)]
    XML(#[from] quick_xml::DeError),

    #[error(transparent)]
    Template(#[from] tera::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error("{0}")]
    Logger(String),
}

impl Error {
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }

    /// HTTP status a controller answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::JsonRejection(rejection) => rejection.status(),
            Self::Clinic(err) => match err {
                ClinicServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ClinicServiceError::VetNotFound { .. } => StatusCode::NOT_FOUND,
                ClinicServiceError::UnknownSpecialty { .. } | ClinicServiceError::NotPersisted => {
                    StatusCode::BAD_REQUEST
                }
                ClinicServiceError::AlreadyPersisted { .. } => StatusCode::CONFLICT,
                ClinicServiceError::DB(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
