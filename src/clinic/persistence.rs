//! sea-orm adapters for the clinic repository contracts.
//!
//! A vet row and its `vet_specialties` association rows are always written
//! inside a single transaction. The adapters run on a pooled
//! [`DatabaseConnection`] or inside an outer [`sea_orm::DatabaseTransaction`],
//! where each write becomes a savepoint.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::{
    entities::{by_name, Specialty, Vet},
    repositories::{SpecialtyRepository, VetRepository},
    service::ClinicServiceError,
    value_objects::Person,
};
use crate::models::_entities::{specialties, vet_specialties, vets};

/// Stores veterinarians in the `vets` and `vet_specialties` tables.
#[derive(Debug)]
pub struct SeaOrmVetRepository<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> SeaOrmVetRepository<C> {
    #[must_use]
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

/// Reads and extends the shared `specialties` reference table.
#[derive(Debug)]
pub struct SeaOrmSpecialtyRepository<C = DatabaseConnection> {
    db: Arc<C>,
}

impl<C> SeaOrmSpecialtyRepository<C> {
    #[must_use]
    pub fn new(db: Arc<C>) -> Self {
        Self { db }
    }
}

fn vet_from_rows(row: vets::Model, specialties: Vec<specialties::Model>) -> Vet {
    let mut vet = Vet::new(Person::new(row.first_name, row.last_name).with_id(row.id))
        .with_license(row.professional_license_number);
    if let Some(email) = row.email {
        vet.set_email(email);
    }
    for specialty in specialties {
        vet.add_specialty(Specialty::new(specialty.id, specialty.name));
    }
    vet
}

fn vet_columns(vet: &Vet) -> vets::ActiveModel {
    vets::ActiveModel {
        first_name: ActiveValue::Set(vet.first_name().to_string()),
        last_name: ActiveValue::Set(vet.last_name().to_string()),
        professional_license_number: ActiveValue::Set(vet.professional_license_number().to_string()),
        email: ActiveValue::Set(vet.email().map(ToString::to_string)),
        ..Default::default()
    }
}

async fn link_specialties<C>(db: &C, vet_id: i32, vet: &Vet) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let links: Vec<vet_specialties::ActiveModel> = vet
        .specialty_ids()
        .map(|specialty_id| vet_specialties::ActiveModel {
            vet_id: ActiveValue::Set(vet_id),
            specialty_id: ActiveValue::Set(specialty_id),
        })
        .collect();
    if links.is_empty() {
        return Ok(());
    }
    vet_specialties::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn unlink_specialties<C>(db: &C, vet_id: i32) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    vet_specialties::Entity::delete_many()
        .filter(vet_specialties::Column::VetId.eq(vet_id))
        .exec(db)
        .await?;
    Ok(())
}

#[async_trait]
impl<C> VetRepository for SeaOrmVetRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    type Error = ClinicServiceError;

    async fn insert(&self, mut vet: Vet) -> Result<Vet, Self::Error> {
        if let Some(id) = vet.id() {
            return Err(ClinicServiceError::AlreadyPersisted { id });
        }

        let txn = self.db.begin().await?;
        let row = vet_columns(&vet).insert(&txn).await?;
        link_specialties(&txn, row.id, &vet).await?;
        txn.commit().await?;

        vet.assign_id(row.id);
        Ok(vet)
    }

    async fn update(&self, vet: Vet) -> Result<(), Self::Error> {
        let id = vet.id().ok_or(ClinicServiceError::NotPersisted)?;

        let txn = self.db.begin().await?;
        if vets::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(ClinicServiceError::VetNotFound { id });
        }
        let mut columns = vet_columns(&vet);
        columns.id = ActiveValue::Unchanged(id);
        columns.update(&txn).await?;
        unlink_specialties(&txn, id).await?;
        link_specialties(&txn, id, &vet).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn get(&self, id: i32) -> Result<Option<Vet>, Self::Error> {
        let Some(row) = vets::Entity::find_by_id(id).one(self.db.as_ref()).await? else {
            return Ok(None);
        };
        let specialties = row
            .find_related(specialties::Entity)
            .order_by_asc(specialties::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(Some(vet_from_rows(row, specialties)))
    }

    async fn delete(&self, id: i32) -> Result<(), Self::Error> {
        let txn = self.db.begin().await?;
        unlink_specialties(&txn, id).await?;
        let result = vets::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ClinicServiceError::VetNotFound { id });
        }
        txn.commit().await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Vet>, Self::Error> {
        let rows = vets::Entity::find()
            .order_by_asc(vets::Column::LastName)
            .order_by_asc(vets::Column::FirstName)
            .order_by_asc(vets::Column::Id)
            .find_with_related(specialties::Entity)
            .all(self.db.as_ref())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(row, specialties)| vet_from_rows(row, specialties))
            .collect())
    }
}

#[async_trait]
impl<C> SpecialtyRepository for SeaOrmSpecialtyRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    type Error = ClinicServiceError;

    async fn insert(&self, name: &str) -> Result<Specialty, Self::Error> {
        let row = specialties::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(Specialty::new(row.id, row.name))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Specialty>, Self::Error> {
        Ok(specialties::Entity::find()
            .filter(specialties::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?
            .map(|row| Specialty::new(row.id, row.name)))
    }

    async fn list(&self) -> Result<Vec<Specialty>, Self::Error> {
        let mut all: Vec<Specialty> = specialties::Entity::find()
            .order_by_asc(specialties::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|row| Specialty::new(row.id, row.name))
            .collect();
        // collation differs between backends, so the order is decided here
        all.sort_by(by_name);
        Ok(all)
    }
}
