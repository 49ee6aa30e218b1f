pub use super::specialties::Entity as Specialties;
pub use super::vet_specialties::Entity as VetSpecialties;
pub use super::vets::Entity as Vets;
