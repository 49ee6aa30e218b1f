#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![doc = "Veterinary clinic records: veterinarians, the specialties they practice, and the web, database and command line plumbing around them."]

pub mod app;
pub mod boot;
#[cfg(feature = "cli")]
pub mod cli;
pub mod clinic;
pub mod config;
pub mod controller;
pub mod db;
pub mod environment;
pub mod errors;
pub mod logger;
pub mod migration;
pub mod models;
#[cfg(feature = "testing")]
pub mod tests_cfg;
pub mod views;

pub use errors::Error;
#[cfg(feature = "testing")]
pub use axum_test::TestServer;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
