//! Veterinarian records and the specialties they practice.
//!
//! Domain types (`entities`, `value_objects`) are free of persistence and
//! transport concerns. Repository traits describe the storage the domain
//! needs, `persistence` implements them on top of sea-orm and `service`
//! is the validating boundary the rest of the application talks to.

pub mod entities;
pub mod persistence;
pub mod repositories;
pub mod service;
pub mod value_objects;

pub use entities::{by_name, Specialty, Vet, VetValidationError, VetValidationErrors};
pub use repositories::{SpecialtyRepository, VetRepository};
pub use service::{ClinicService, ClinicServiceError};
pub use value_objects::Person;
