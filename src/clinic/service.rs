use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{
    entities::{Specialty, Vet, VetValidationErrors},
    persistence::{SeaOrmSpecialtyRepository, SeaOrmVetRepository},
    repositories::{SpecialtyRepository, VetRepository},
};

/// Type alias simplifying vet repository trait object usage inside the service.
pub type VetRepositoryHandle =
    dyn VetRepository<Error = ClinicServiceError> + Send + Sync + 'static;
/// Type alias simplifying specialty repository trait object usage inside the service.
pub type SpecialtyRepositoryHandle =
    dyn SpecialtyRepository<Error = ClinicServiceError> + Send + Sync + 'static;

/// Persistence boundary for clinic records.
///
/// Every write goes through [`Vet::validate`] first; invalid records never
/// reach the repositories.
#[derive(Clone)]
pub struct ClinicService {
    vets: Arc<VetRepositoryHandle>,
    specialties: Arc<SpecialtyRepositoryHandle>,
}

impl ClinicService {
    /// Creates a new [`ClinicService`] from trait object handles.
    pub fn new(
        vets: Arc<VetRepositoryHandle>,
        specialties: Arc<SpecialtyRepositoryHandle>,
    ) -> Self {
        Self { vets, specialties }
    }

    /// Builds a service backed by the given database connection.
    #[must_use]
    pub fn from_connection(db: &DatabaseConnection) -> Self {
        Self::on(Arc::new(db.clone()))
    }

    /// Builds a service whose every read and write goes through `txn`.
    ///
    /// The caller commits the transaction once the service has been dropped.
    #[must_use]
    pub fn within(txn: &Arc<DatabaseTransaction>) -> Self {
        Self::on(Arc::clone(txn))
    }

    fn on<C>(db: Arc<C>) -> Self
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
    {
        Self::new(
            Arc::new(SeaOrmVetRepository::new(Arc::clone(&db))),
            Arc::new(SeaOrmSpecialtyRepository::new(db)),
        )
    }

    /// Validates and stores a new veterinarian.
    ///
    /// # Errors
    /// Fails with [`ClinicServiceError::Invalid`] when the vet breaks a
    /// persistence rule, or with the repository error.
    pub async fn register_vet(&self, vet: Vet) -> Result<Vet, ClinicServiceError> {
        if let Err(errors) = vet.validate() {
            tracing::warn!(vet.name = %vet.person(), error = %errors, "vet_rejected");
            return Err(errors.into());
        }
        let stored = self.vets.insert(vet).await?;
        tracing::info!(
            vet.id = ?stored.id(),
            specialties = stored.nr_of_specialties(),
            "vet_registered"
        );
        Ok(stored)
    }

    /// Validates and replaces a stored veterinarian.
    ///
    /// # Errors
    /// Same as [`ClinicService::register_vet`], plus
    /// [`ClinicServiceError::VetNotFound`] for unknown vets.
    pub async fn update_vet(&self, vet: Vet) -> Result<(), ClinicServiceError> {
        if let Err(errors) = vet.validate() {
            tracing::warn!(vet.id = ?vet.id(), error = %errors, "vet_rejected");
            return Err(errors.into());
        }
        let id = vet.id();
        self.vets.update(vet).await?;
        tracing::info!(vet.id = ?id, "vet_updated");
        Ok(())
    }

    /// # Errors
    /// Returns the repository error.
    pub async fn vet(&self, id: i32) -> Result<Option<Vet>, ClinicServiceError> {
        self.vets.get(id).await
    }

    /// Lists every veterinarian ordered by name.
    ///
    /// # Errors
    /// Returns the repository error.
    pub async fn vets(&self) -> Result<Vec<Vet>, ClinicServiceError> {
        self.vets.list().await
    }

    /// # Errors
    /// Fails with [`ClinicServiceError::VetNotFound`] for unknown vets.
    pub async fn remove_vet(&self, id: i32) -> Result<(), ClinicServiceError> {
        self.vets.delete(id).await?;
        tracing::info!(vet.id = id, "vet_removed");
        Ok(())
    }

    /// # Errors
    /// Returns the repository error.
    pub async fn specialties(&self) -> Result<Vec<Specialty>, ClinicServiceError> {
        self.specialties.list().await
    }

    /// Returns the specialty with this name, creating it when missing.
    ///
    /// # Errors
    /// Returns the repository error.
    pub async fn ensure_specialty(&self, name: &str) -> Result<Specialty, ClinicServiceError> {
        if let Some(existing) = self.specialties.find_by_name(name).await? {
            return Ok(existing);
        }
        let created = self.specialties.insert(name).await?;
        tracing::info!(specialty.id = created.id(), specialty.name = name, "specialty_created");
        Ok(created)
    }

    /// Resolves specialty names against the reference table.
    ///
    /// # Errors
    /// Fails with [`ClinicServiceError::UnknownSpecialty`] on the first name
    /// that is not in the table.
    pub async fn resolve_specialties(
        &self,
        names: &[String],
    ) -> Result<Vec<Specialty>, ClinicServiceError> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let specialty = self
                .specialties
                .find_by_name(name)
                .await?
                .ok_or_else(|| ClinicServiceError::UnknownSpecialty { name: name.clone() })?;
            resolved.push(specialty);
        }
        Ok(resolved)
    }
}

/// Errors raised by the clinic service and its persistence adapters.
#[derive(Debug, thiserror::Error)]
pub enum ClinicServiceError {
    /// The vet broke at least one persistence rule.
    #[error(transparent)]
    Invalid(#[from] VetValidationErrors),
    /// Referenced vet was not found.
    #[error("vet `{id}` not found")]
    VetNotFound { id: i32 },
    /// Attempted to insert a vet that already carries an identifier.
    #[error("vet `{id}` has already been persisted")]
    AlreadyPersisted { id: i32 },
    /// Attempted to update a vet that was never persisted.
    #[error("vet has not been persisted yet")]
    NotPersisted,
    /// Referenced specialty name is not in the reference table.
    #[error("unknown specialty `{name}`")]
    UnknownSpecialty { name: String },
    /// The database rejected the operation.
    #[error(transparent)]
    DB(#[from] sea_orm::DbErr),
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{ClinicService, ClinicServiceError};
    use crate::clinic::{
        entities::{Specialty, Vet, VetValidationError},
        repositories::{SpecialtyRepository, VetRepository},
        value_objects::Person,
    };

    #[derive(Default)]
    struct RecordingRepository {
        inserted: Mutex<Vec<Vet>>,
        specialties: Mutex<Vec<Specialty>>,
    }

    #[async_trait]
    impl VetRepository for RecordingRepository {
        type Error = ClinicServiceError;

        async fn insert(&self, mut vet: Vet) -> Result<Vet, Self::Error> {
            let mut guard = self.inserted.lock().unwrap();
            vet.assign_id(i32::try_from(guard.len()).unwrap() + 1);
            guard.push(vet.clone());
            Ok(vet)
        }

        async fn update(&self, vet: Vet) -> Result<(), Self::Error> {
            Err(ClinicServiceError::VetNotFound {
                id: vet.id().unwrap_or_default(),
            })
        }

        async fn get(&self, _id: i32) -> Result<Option<Vet>, Self::Error> {
            Ok(None)
        }

        async fn delete(&self, id: i32) -> Result<(), Self::Error> {
            Err(ClinicServiceError::VetNotFound { id })
        }

        async fn list(&self) -> Result<Vec<Vet>, Self::Error> {
            Ok(self.inserted.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl SpecialtyRepository for RecordingRepository {
        type Error = ClinicServiceError;

        async fn insert(&self, name: &str) -> Result<Specialty, Self::Error> {
            let mut guard = self.specialties.lock().unwrap();
            let specialty = Specialty::new(i32::try_from(guard.len()).unwrap() + 1, name);
            guard.push(specialty.clone());
            Ok(specialty)
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Specialty>, Self::Error> {
            let guard = self.specialties.lock().unwrap();
            Ok(guard.iter().find(|s| s.name() == name).cloned())
        }

        async fn list(&self) -> Result<Vec<Specialty>, Self::Error> {
            Ok(self.specialties.lock().unwrap().clone())
        }
    }

    fn service() -> (ClinicService, Arc<RecordingRepository>) {
        let repository = Arc::new(RecordingRepository::default());
        let service = ClinicService::new(repository.clone(), repository.clone());
        (service, repository)
    }

    #[tokio::test]
    async fn invalid_vets_are_not_persisted() {
        let (service, repository) = service();
        let vet = Vet::new(Person::new("James", "Carter")).with_email("not-an-email");

        let err = service.register_vet(vet).await.expect_err("invalid vet");
        let errors = match err {
            ClinicServiceError::Invalid(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert!(errors.contains(&VetValidationError::MissingRequiredField {
            field: "professionalLicenseNumber"
        }));
        assert!(repository.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_vets_are_persisted() {
        let (service, repository) = service();
        let vet = Vet::new(Person::new("James", "Carter"))
            .with_license("LIC-0001")
            .with_email("vet@example.com");

        let stored = service.register_vet(vet).await.expect("valid vet");
        assert_eq!(stored.id(), Some(1));
        assert_eq!(repository.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_validates_before_reaching_repository() {
        let (service, _) = service();
        let vet = Vet::new(Person::new("James", "Carter").with_id(1));
        let err = service.update_vet(vet).await.expect_err("invalid vet");
        assert!(matches!(err, ClinicServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn ensure_specialty_reuses_existing_rows() {
        let (service, repository) = service();
        let first = service.ensure_specialty("surgery").await.expect("create");
        let second = service.ensure_specialty("surgery").await.expect("reuse");
        assert_eq!(first, second);
        assert_eq!(repository.specialties.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_specialty_names_are_reported() {
        let (service, _) = service();
        service.ensure_specialty("surgery").await.expect("create");

        let resolved = service
            .resolve_specialties(&["surgery".to_string()])
            .await
            .expect("known");
        assert_eq!(resolved.len(), 1);

        let err = service
            .resolve_specialties(&["surgery".to_string(), "oncology".to_string()])
            .await
            .expect_err("unknown");
        assert!(matches!(
            err,
            ClinicServiceError::UnknownSpecialty { name } if name == "oncology"
        ));
    }
}
