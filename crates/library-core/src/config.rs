//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Common pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
            sort_by: Some("created_at".to_string()),
            sort_order: Some("desc".to_string()),
        }
    }
}

impl PaginationParams {
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(20).min(100).max(1);
        (page, page_size)
    }
}

/// Process-wide configuration (§6), assembled once at startup from
/// environment variables with typed defaults — not a config-file/hot-reload
/// layer, following the pattern the rest of the stack already uses for its
/// database/runtime settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_v1_prefix: String,
    pub store_url: String,
    pub bus_url: String,
    pub listen_addr: String,
    pub retry_max_attempts: u32,
    pub retry_backoff_cap_sec: u64,
    pub page_size_max: u64,
}

impl AppConfig {
    /// Reads every setting from the environment, falling back to the
    /// defaults named in §6 when a variable is unset.
    pub fn from_env() -> Self {
        Self {
            api_v1_prefix: std::env::var("API_V1_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
            store_url: std::env::var("STORE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
            bus_url: std::env::var("BUS_URL").unwrap_or_else(|_| "memory://local".to_string()),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8350".to_string()),
            retry_max_attempts: std::env::var("RETRY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),
            retry_backoff_cap_sec: std::env::var("RETRY_BACKOFF_CAP_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            page_size_max: std::env::var("PAGE_SIZE_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_normalize_clamps() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(500),
            ..PaginationParams::default()
        };
        let (page, page_size) = params.normalize();
        assert_eq!(page, 1);
        assert_eq!(page_size, 100);
    }

    #[test]
    fn app_config_has_spec_defaults_when_env_unset() {
        std::env::remove_var("API_V1_PREFIX");
        std::env::remove_var("LISTEN_ADDR");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.api_v1_prefix, "/api/v1");
        assert_eq!(cfg.listen_addr, "0.0.0.0:8350");
        assert_eq!(cfg.page_size_max, 100);
    }
}