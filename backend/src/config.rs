//! Server configuration file support and environment overrides.
//!
//! Configuration is read from `predictor.toml` when one is found, otherwise
//! defaults are used. Environment variables are applied last and win.
//!
//! # Environment Variables
//! - `PREDICTOR_CONFIG` (optional): explicit path to the TOML file
//! - `HOST` (optional, default: 0.0.0.0): bind host
//! - `PORT` (optional, default: 8080): bind port
//! - `MODEL_PATH` (optional, default: model.json): model artifact path
//! - `ALLOW_MISSING_MODEL` (optional, default: false): start without a model

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Server configuration from file and environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
}

/// Bind address settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Model artifact settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Start serving even if the artifact cannot be loaded
    #[serde(default)]
    pub allow_missing: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            allow_missing: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location, if a file exists.
    ///
    /// Searches for `predictor.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("predictor.toml"),
            PathBuf::from("backend/predictor.toml"),
            PathBuf::from("../predictor.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the full configuration: file (explicit or discovered), then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("PREDICTOR_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `MODEL_PATH` and `ALLOW_MISSING_MODEL`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = match port.parse() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidEnv { var: "PORT", value: port }),
            };
        }
        if let Ok(path) = env::var("MODEL_PATH") {
            self.model.path = PathBuf::from(path);
        }
        if let Ok(flag) = env::var("ALLOW_MISSING_MODEL") {
            self.model.allow_missing = match parse_flag(&flag) {
                Some(allow) => allow,
                None => {
                    return Err(ConfigError::InvalidEnv {
                        var: "ALLOW_MISSING_MODEL",
                        value: flag,
                    })
                }
            };
        }
        Ok(())
    }

    /// Socket address to bind the server to.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
