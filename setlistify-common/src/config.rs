//! Configuration loading and bootstrap value resolution
//!
//! Each bootstrap value is resolved in priority order:
//! 1. Command-line argument (clap also maps the `SETLISTIFY_*` environment variables here)
//! 2. TOML config file
//! 3. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bootstrap configuration loaded from a TOML file
///
/// Every field is optional; anything missing falls through to the compiled default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Address the HTTP server binds to
    #[serde(default)]
    pub bind_address: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            // Working directory, next to the binary's launch point
            database_path: PathBuf::from("setlistify.db"),
            bind_address: "127.0.0.1".to_string(),
            port: 5730,
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line (or via environment through clap)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    /// Resolve every value: CLI → TOML → compiled default
    pub fn resolve(cli: CliOverrides, toml_config: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::default();

        Self {
            database_path: cli
                .database_path
                .or_else(|| toml_config.database_path.clone())
                .unwrap_or(defaults.database_path),
            bind_address: cli
                .bind_address
                .or_else(|| toml_config.bind_address.clone())
                .unwrap_or(defaults.bind_address),
            port: cli.port.or(toml_config.port).unwrap_or(defaults.port),
            log_level: cli
                .log_level
                .unwrap_or_else(|| toml_config.logging.level.clone()),
        }
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Load the TOML bootstrap file
///
/// An explicitly named file must exist and parse. Without one, the
/// platform config location (`<config_dir>/setlistify/config.toml`) is tried;
/// if nothing is found the defaults are used and a warning is logged.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit_path {
        return parse_toml_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => parse_toml_file(&path),
        _ => {
            warn!("No config file found, using compiled defaults");
            Ok(TomlConfig::default())
        }
    }
}

fn parse_toml_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Platform config file location
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("setlistify").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_beats_toml_beats_default() {
        let toml_config = TomlConfig {
            database_path: Some(PathBuf::from("/srv/toml.db")),
            bind_address: None,
            port: Some(8000),
            logging: LoggingConfig::default(),
        };
        let cli = CliOverrides {
            port: Some(9000),
            ..Default::default()
        };

        let config = ServerConfig::resolve(cli, &toml_config);

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/srv/toml.db"));
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.listen_address(), "127.0.0.1:9000");
    }
}
