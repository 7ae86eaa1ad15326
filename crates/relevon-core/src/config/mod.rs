//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RELEVON_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::scoring::{
    DEFAULT_EVIDENCE_COUNT, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_SENSITIVITY_THRESHOLD,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RELEVON_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory containing the bi-encoder model
    /// (`config.json`, `model.safetensors`, `tokenizer.json`).
    ///
    /// When unset the embedder runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Directory containing the sensitivity classifier model.
    ///
    /// When unset, sensitivity classification is disabled.
    pub classifier_path: Option<PathBuf>,

    /// Soft cap on chunk length, in characters. Default: `250`.
    pub max_chunk_chars: usize,

    /// Cosine similarity at or above which a chunk counts as relevant.
    /// Default: `0.35`.
    pub relevance_threshold: f32,

    /// Number of evidence snippets returned per request. Default: `5`.
    pub evidence_count: usize,

    /// Sensitivity score above which a chunk is surfaced as evidence.
    /// Default: `0.4`.
    pub sensitivity_threshold: f32,

    /// When set, model files are downloaded into this directory at startup
    /// if missing (best-effort).
    pub auto_download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            classifier_path: None,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            evidence_count: DEFAULT_EVIDENCE_COUNT,
            sensitivity_threshold: DEFAULT_SENSITIVITY_THRESHOLD,
            auto_download_dir: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "RELEVON_PORT";
    const ENV_BIND_ADDR: &'static str = "RELEVON_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "RELEVON_MODEL_PATH";
    const ENV_CLASSIFIER_PATH: &'static str = "RELEVON_CLASSIFIER_PATH";
    const ENV_MAX_CHUNK_CHARS: &'static str = "RELEVON_MAX_CHUNK_CHARS";
    const ENV_RELEVANCE_THRESHOLD: &'static str = "RELEVON_RELEVANCE_THRESHOLD";
    const ENV_EVIDENCE_COUNT: &'static str = "RELEVON_EVIDENCE_COUNT";
    const ENV_SENSITIVITY_THRESHOLD: &'static str = "RELEVON_SENSITIVITY_THRESHOLD";
    const ENV_AUTO_DOWNLOAD: &'static str = "RELEVON_AUTO_DOWNLOAD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let classifier_path = Self::parse_optional_path_from_env(Self::ENV_CLASSIFIER_PATH);
        let max_chunk_chars =
            Self::parse_usize_from_env(Self::ENV_MAX_CHUNK_CHARS, defaults.max_chunk_chars);
        let relevance_threshold = Self::parse_f32_from_env(
            Self::ENV_RELEVANCE_THRESHOLD,
            defaults.relevance_threshold,
        );
        let evidence_count =
            Self::parse_usize_from_env(Self::ENV_EVIDENCE_COUNT, defaults.evidence_count);
        let sensitivity_threshold = Self::parse_f32_from_env(
            Self::ENV_SENSITIVITY_THRESHOLD,
            defaults.sensitivity_threshold,
        );
        let auto_download_dir = Self::parse_optional_path_from_env(Self::ENV_AUTO_DOWNLOAD);

        Ok(Self {
            port,
            bind_addr,
            model_path,
            classifier_path,
            max_chunk_chars,
            relevance_threshold,
            evidence_count,
            sensitivity_threshold,
            auto_download_dir,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.classifier_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.max_chunk_chars == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_CHUNK_CHARS,
                reason: "max_chunk_chars must be positive".to_string(),
            });
        }

        if !(-1.0..=1.0).contains(&self.relevance_threshold) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_RELEVANCE_THRESHOLD,
                reason: format!(
                    "relevance_threshold must be between -1.0 and 1.0, got {}",
                    self.relevance_threshold
                ),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &str, default: f32) -> f32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
