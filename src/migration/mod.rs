//! Schema migrations for the clinic tables.
use sea_orm_migration::{MigrationTrait, MigratorTrait};

mod m20240101_000001_clinic_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_clinic_tables::Migration)]
    }
}
