//! # Configuration Utilities
//!
//! Configuration structures for the `stegano` binary and the TOML loader that
//! reads them.
//!
//! ## Example
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [encode]
//! strict_capacity = false
//! output_format = "png"
//!
//! [locker]
//! path = "locker.json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: AppConfig = load_config("config/stegano.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
    let config: T =
        toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path))?;
    Ok(config)
}

/// Complete application configuration.
///
/// Every section is optional in the file and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub encode: EncodeConfig,
    pub locker: LockerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Encoding behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Refuse cover images that cannot hold the whole message.
    /// When false, the message is truncated with a warning.
    pub strict_capacity: bool,
    /// Extension used when `encode` is given no output path
    pub output_format: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            strict_capacity: true,
            output_format: "png".to_string(),
        }
    }
}

/// Where decoded messages are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockerConfig {
    pub path: PathBuf,
}

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("locker.json"),
        }
    }
}

impl AppConfig {
    /// Load from `path` when given, otherwise use the defaults.
    pub fn from_optional_file(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.encode.strict_capacity);
        assert_eq!(config.encode.output_format, "png");
        assert_eq!(config.locker.path, PathBuf::from("locker.json"));
    }

    #[test]
    fn test_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [encode]
            strict_capacity = false
            "#,
        )
        .unwrap();
        assert!(!config.encode.strict_capacity);
        assert_eq!(config.encode.output_format, "png");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\n\n[locker]\npath = \"/tmp/cleats.json\"").unwrap();

        let config: AppConfig = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.locker.path, PathBuf::from("/tmp/cleats.json"));
        assert!(config.encode.strict_capacity);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config::<AppConfig>("/nonexistent/stegano.toml").is_err());
        assert_eq!(AppConfig::from_optional_file(None).unwrap(), AppConfig::default());
    }
}
