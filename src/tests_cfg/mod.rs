//! Helpers for tests: an in-memory configuration and a migrated context.
pub mod app;
pub mod config;
