//! sea-orm entity definitions backing the clinic records.
pub mod _entities;
