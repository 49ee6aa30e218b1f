pub mod prelude;

pub mod specialties;
pub mod vet_specialties;
pub mod vets;
