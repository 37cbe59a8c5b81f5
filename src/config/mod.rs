use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub proxy: ProxyConfig,
    pub security: SecurityConfig,
    pub static_shell: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub backend: StorageBackend,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Origin requests under `mount_prefix` are forwarded to. Unset means the proxy answers 500.
    pub backend_url: Option<String>,
    pub mount_prefix: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allow_origin: String,
    /// When false, a missing X-User-ID is accepted on the user resource routes.
    pub require_user_header: bool,
}

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/life_planner";
const DEFAULT_PROXY_PREFIX: &str = "/.netlify/functions/api";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("PLANNER_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("STORAGE_BACKEND") {
            self.database.backend = match v.to_ascii_lowercase().as_str() {
                "memory" | "mem" => StorageBackend::Memory,
                _ => StorageBackend::Postgres,
            };
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Proxy overrides, older deployments set the frontend build variables
        if let Some(v) = ["PROXY_BACKEND_URL", "REACT_APP_API_URL", "VITE_API_URL"]
            .iter()
            .find_map(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
        {
            self.proxy.backend_url = Some(v);
        }
        if let Ok(v) = env::var("PROXY_MOUNT_PREFIX") {
            self.proxy.mount_prefix = v;
        }
        if let Ok(v) = env::var("PROXY_TIMEOUT_SECS") {
            self.proxy.timeout_secs = v.parse().unwrap_or(self.proxy.timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ALLOW_ORIGIN") {
            self.security.allow_origin = v;
        }
        if let Ok(v) = env::var("SECURITY_REQUIRE_USER_HEADER") {
            self.security.require_user_header = v.parse().unwrap_or(self.security.require_user_header);
        }

        if let Ok(v) = env::var("STATIC_SHELL_PATH") {
            self.static_shell = Some(PathBuf::from(v));
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                backend: StorageBackend::Postgres,
                max_connections: 10,
                connection_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024, // 50MB
            },
            proxy: ProxyConfig {
                backend_url: None,
                mount_prefix: DEFAULT_PROXY_PREFIX.to_string(),
                timeout_secs: 30,
            },
            security: SecurityConfig {
                allow_origin: "*".to_string(),
                require_user_header: false,
            },
            static_shell: None,
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                ..Self::development().database
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            ..Self::development()
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
                ..Self::development().database
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            proxy: ProxyConfig {
                timeout_secs: 60,
                ..Self::development().proxy
            },
            ..Self::development()
        }
    }

    /// Development defaults with the in-memory store, used by tests and local demos
    pub fn in_memory() -> Self {
        let mut config = Self::development();
        config.database.backend = StorageBackend::Memory;
        config.api.enable_request_logging = false;
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.proxy.mount_prefix, "/.netlify/functions/api");
        assert!(config.proxy.backend_url.is_none());
        assert!(!config.security.require_user_header);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.proxy.mount_prefix, DEFAULT_PROXY_PREFIX);
    }

    #[test]
    fn in_memory_config_switches_backend() {
        let config = AppConfig::in_memory();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
    }
}
