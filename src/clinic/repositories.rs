use async_trait::async_trait;

use super::entities::{Specialty, Vet};

/// Contract describing persistence responsibilities for veterinarians.
#[async_trait]
pub trait VetRepository {
    /// Associated error type allowing infrastructure specific failures.
    type Error;

    /// Persists a brand new veterinarian and returns it with its identifier.
    ///
    /// The vet row and its specialty associations are written atomically.
    async fn insert(&self, vet: Vet) -> Result<Vet, Self::Error>;

    /// Replaces a stored veterinarian, including its specialty associations.
    async fn update(&self, vet: Vet) -> Result<(), Self::Error>;

    /// Retrieves a veterinarian with its specialties.
    ///
    /// Implementors must return `Ok(None)` when the vet is missing.
    async fn get(&self, id: i32) -> Result<Option<Vet>, Self::Error>;

    /// Deletes a veterinarian and its specialty associations.
    async fn delete(&self, id: i32) -> Result<(), Self::Error>;

    /// Lists all veterinarians ordered by last name, first name and id.
    async fn list(&self) -> Result<Vec<Vet>, Self::Error>;
}

/// Contract for the shared specialty reference table.
#[async_trait]
pub trait SpecialtyRepository {
    type Error;

    /// Stores a new specialty name.
    async fn insert(&self, name: &str) -> Result<Specialty, Self::Error>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Specialty>, Self::Error>;

    /// Lists all specialties ordered by name.
    async fn list(&self) -> Result<Vec<Specialty>, Self::Error>;
}
