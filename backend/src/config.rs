//! Server configuration file and environment handling.
//!
//! Configuration is read from a TOML file and then overridden by environment
//! variables:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 9000
//! body_limit_bytes = 1048576
//!
//! [seed]
//! path = "fixtures/league.json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "REFEREE_CONFIG";

/// Error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

/// Listener and request settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

/// Optional fixture file loaded into the repository at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Locate the configuration file, if any.
    ///
    /// `REFEREE_CONFIG` wins when set. Otherwise searches for
    /// `referee-server.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        [
            PathBuf::from("referee-server.toml"),
            PathBuf::from("backend/referee-server.toml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Load from the located file (or defaults), then apply environment overrides.
    ///
    /// # Environment Variables
    /// - `REFEREE_CONFIG`: Path to the configuration file
    /// - `HOST`: Server host (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8080)
    /// - `SEED_PATH`: JSON fixture file to load at startup
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::locate() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override file settings with `HOST`, `PORT` and `SEED_PATH` when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(seed) = env::var("SEED_PATH") {
            self.seed.path = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "server.host".to_string(),
            value: self.server.host.clone(),
        })
    }
}
