use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    pub sample: bool,
    pub sample_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("DATA_PATH")
            .unwrap_or_else(|_| "./data/recipes.jsonl".to_string())
            .into();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Settings {
            data: DataConfig {
                path,
                sample: env_or("SAMPLE_CORPUS", "false")?,
                sample_seed: env_or("SAMPLE_SEED", "42")?,
            },
            server: ServerConfig {
                host,
                port: env_or("PORT", "8080")?,
            },
            pagination: PaginationConfig {
                default_page_size: env_or("DEFAULT_PAGE_SIZE", "25")?,
                max_page_size: env_or("MAX_PAGE_SIZE", "100")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.pagination.default_page_size == 0 {
            return Err(Error::Config(
                "Default page size must be non-zero".to_string(),
            ));
        }

        if self.pagination.default_page_size > self.pagination.max_page_size {
            return Err(Error::Config(
                "Default page size cannot exceed the maximum page size".to_string(),
            ));
        }

        Ok(())
    }
}
