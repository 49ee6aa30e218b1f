use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub professional_license_number: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vet_specialties::Entity")]
    VetSpecialties,
}

impl Related<super::vet_specialties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VetSpecialties.def()
    }
}

impl Related<super::specialties::Entity> for Entity {
    fn to() -> RelationDef {
        super::vet_specialties::Relation::Specialties.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::vet_specialties::Relation::Vets.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
