//! Configuration module
//!
//! Configuration is read from the environment (with `.env` support through `dotenvy`)
//! and validated once at start-up.

use std::env;
use std::path::{Path, PathBuf};

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const MAX_UPLOAD_SIZE_MB: usize = 10;

/// Settings shared by every HTTP-facing component
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub environment: String,
}

/// Full application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub storage_backend: StorageBackend,
    pub assets_root: PathBuf,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn as_app(&self) -> &AppConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_app().validate()
    }

    pub fn server_host(&self) -> &str {
        &self.as_app().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.as_app().base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_app().base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_app().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_app().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.as_app().database_url
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_app().storage_backend
    }

    pub fn assets_root(&self) -> &Path {
        &self.as_app().assets_root
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_app().max_upload_size_bytes
    }

    /// Absolute origin that generated thumbnail URLs are rooted at.
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.server_host(), self.server_port())
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()?;

        let base = BaseConfig {
            server_host: env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
        };

        let config = AppConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tubely.db?mode=rwc".to_string()),
            storage_backend,
            assets_root: env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            max_upload_size_bytes: megabytes_to_bytes(max_upload_size_mb)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.storage_backend == StorageBackend::Local
            && self.assets_root.as_os_str().is_empty()
        {
            return Err(anyhow::anyhow!(
                "ASSETS_ROOT must be set when STORAGE_BACKEND=local"
            ));
        }

        Ok(())
    }

    fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}
