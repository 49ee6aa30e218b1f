use crate::{
    config::{self, Config},
    logger,
};

/// Configuration backed by a private in-memory SQLite database.
///
/// The pool is pinned to one long-lived connection, otherwise every new
/// connection would open a different empty database.
#[must_use]
pub fn test_config() -> Config {
    Config {
        logger: config::Logger {
            enable: false,
            level: logger::LogLevel::Off,
            format: logger::Format::Compact,
            override_filter: None,
        },
        server: config::Server {
            binding: "localhost".to_string(),
            port: 5555,
            host: "http://localhost".to_string(),
        },
        database: config::Database {
            uri: "sqlite::memory:".to_string(),
            enable_logging: false,
            min_connections: 1,
            max_connections: 1,
            connect_timeout: 5_000,
            idle_timeout: 600_000,
            auto_migrate: true,
            dangerously_truncate: false,
            dangerously_recreate: false,
        },
    }
}
