//! Database helpers: connection, connectivity check, schema and seed data.

use std::{collections::HashSet, sync::Arc, time::Duration};

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Statement,
    TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use serde::Deserialize;

use crate::{
    clinic::{ClinicService, Person, Vet},
    config,
    migration::Migrator,
    models::_entities::{specialties, vet_specialties, vets},
    Error, Result,
};

const DEFAULT_FIXTURES: &str = include_str!("fixtures/clinic.yaml");

/// Opens a connection pool as described by the `database` configuration.
///
/// # Errors
/// Returns the driver error when the database cannot be reached.
pub async fn connect(config: &config::Database) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(&config.uri);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_millis(config.connect_timeout))
        .idle_timeout(Duration::from_millis(config.idle_timeout))
        .sqlx_logging(config.enable_logging);

    Database::connect(opt).await
}

/// Runs `SELECT 1` against the database and returns the value read back.
///
/// # Errors
/// Returns an error when the query fails or yields no row.
pub async fn ping(db: &DatabaseConnection) -> Result<i32> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS result",
        ))
        .await?
        .ok_or_else(|| Error::string("connectivity check returned no row"))?;
    Ok(row.try_get::<i32>("", "result")?)
}

/// Applies pending migrations.
///
/// # Errors
/// Returns the migration error.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

/// Drops every table and migrates again.
///
/// # Errors
/// Returns the migration error.
pub async fn reset(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::fresh(db).await
}

/// Deletes every row, association rows first.
///
/// # Errors
/// Returns the database error.
pub async fn truncate(db: &DatabaseConnection) -> Result<(), DbErr> {
    vet_specialties::Entity::delete_many().exec(db).await?;
    vets::Entity::delete_many().exec(db).await?;
    specialties::Entity::delete_many().exec(db).await?;
    Ok(())
}

/// Seed data for the clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub vets: Vec<VetFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VetFixture {
    pub first_name: String,
    pub last_name: String,
    pub professional_license_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl Fixtures {
    /// The clinic's standard veterinarians and specialties.
    ///
    /// # Errors
    /// Returns an error if the embedded fixture file is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(DEFAULT_FIXTURES)
    }

    /// # Errors
    /// Returns an error if the YAML does not describe fixtures.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Loads fixtures through the clinic service, so seeded vets are validated
/// like any other record.
///
/// Everything runs in one transaction: either every fixture is stored or none
/// is. Specialties are created when missing. A vet is skipped when one with
/// the same license number already exists, including an earlier fixture of the
/// same file. Returns the number of vets inserted.
///
/// # Errors
/// Fails on the first vet that does not validate or cannot be stored; nothing
/// is written in that case.
pub async fn seed(db: &DatabaseConnection, fixtures: &Fixtures) -> Result<usize> {
    let txn = Arc::new(db.begin().await?);
    let clinic = ClinicService::within(&txn);
    let loaded = load_fixtures(&clinic, fixtures).await;
    drop(clinic);

    let txn = Arc::into_inner(txn).ok_or_else(|| Error::string("seed transaction is still shared"))?;
    match loaded {
        Ok(inserted) => {
            txn.commit().await?;
            tracing::info!(vets = inserted, "seed_loaded");
            Ok(inserted)
        }
        Err(err) => {
            txn.rollback().await?;
            tracing::warn!(error = %err, "seed_rolled_back");
            Err(err)
        }
    }
}

async fn load_fixtures(clinic: &ClinicService, fixtures: &Fixtures) -> Result<usize> {
    for name in &fixtures.specialties {
        clinic.ensure_specialty(name).await?;
    }

    let mut licenses: HashSet<String> = clinic
        .vets()
        .await?
        .iter()
        .map(|vet| vet.professional_license_number().to_string())
        .collect();
    let mut inserted = 0;
    for fixture in &fixtures.vets {
        if !licenses.insert(fixture.professional_license_number.clone()) {
            tracing::debug!(
                license = %fixture.professional_license_number,
                "seed_vet_exists"
            );
            continue;
        }

        let mut vet = Vet::new(Person::new(&fixture.first_name, &fixture.last_name))
            .with_license(&fixture.professional_license_number);
        if let Some(email) = &fixture.email {
            vet.set_email(email);
        }
        for name in &fixture.specialties {
            vet.add_specialty(clinic.ensure_specialty(name).await?);
        }
        clinic.register_vet(vet).await?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::Fixtures;

    #[test]
    fn bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().expect("bundled fixtures");
        assert_eq!(fixtures.specialties, vec!["radiology", "surgery", "dentistry"]);
        assert_eq!(fixtures.vets.len(), 6);
        assert!(fixtures
            .vets
            .iter()
            .all(|vet| !vet.professional_license_number.is_empty()));
    }
}
