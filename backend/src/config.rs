//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Book store configuration
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Which persistence backend serves the books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// SQLite database file
    #[default]
    Sqlite,
    /// Process-local map, lost on restart
    Memory,
}

impl StoreKind {
    /// Parse a `BOOK_STORE` value (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(StoreKind::Sqlite),
            "memory" => Some(StoreKind::Memory),
            _ => None,
        }
    }
}

/// Book store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected backend
    pub kind: StoreKind,
    /// Raw `BOOK_STORE` value when it was not recognized
    pub unrecognized_kind: Option<String>,
    /// SQLite database file
    pub database_path: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let raw_kind = env::var("BOOK_STORE").ok();
        let kind = raw_kind.as_deref().and_then(StoreKind::parse);

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            },
            store: StoreConfig {
                kind: kind.unwrap_or_default(),
                unrecognized_kind: if kind.is_none() { raw_kind } else { None },
                database_path: env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "book_list.db".to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["HOST", "PORT", "BOOK_STORE", "DATABASE_PATH"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.server_addr(), "127.0.0.1:5000");
        assert_eq!(config.store.kind, StoreKind::Sqlite);
        assert_eq!(config.store.unrecognized_kind, None);
        assert_eq!(config.store.database_path, "book_list.db");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "8081");
        env::set_var("BOOK_STORE", "Memory");
        env::set_var("DATABASE_PATH", "/tmp/books.db");

        let config = Config::from_env();
        assert_eq!(config.server_addr(), "0.0.0.0:8081");
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.store.database_path, "/tmp/books.db");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_store_falls_back_to_sqlite() {
        clear_env();
        env::set_var("BOOK_STORE", "mysql");
        env::set_var("PORT", "not-a-port");

        let config = Config::from_env();
        assert_eq!(config.store.kind, StoreKind::Sqlite);
        assert_eq!(config.store.unrecognized_kind.as_deref(), Some("mysql"));
        assert_eq!(config.server.port, 5000);
        clear_env();
    }
}
