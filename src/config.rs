//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_data_path() -> String {
    "base_vendas.csv".to_string()
}

fn default_delimiter() -> char {
    ','
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
        }
    }
}

impl DataConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        delimiter_byte(self.delimiter)
    }
}

/// Accept only single-byte ASCII delimiters
pub fn delimiter_byte(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::Invalid(format!(
            "delimiter must be a single ASCII character, got {:?}",
            delimiter
        )))
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built dashboard UI, served at `/` when set
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Presentation settings for the rendered pages
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_dashboard_title")]
    pub dashboard_title: String,

    #[serde(default = "default_map_zoom")]
    pub map_zoom: f64,

    /// Multiplier from total revenue to bubble radius
    #[serde(default = "default_radius_scale")]
    pub radius_scale: f64,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_dashboard_title() -> String {
    "Sales Dashboard".to_string()
}

fn default_map_zoom() -> f64 {
    4.0
}

fn default_radius_scale() -> f64 {
    100.0
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            dashboard_title: default_dashboard_title(),
            map_zoom: default_map_zoom(),
            radius_scale: default_radius_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sales-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/sales-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production, a map in tests)
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(path) = var("SALES_DASHBOARD_DATA_PATH") {
            self.data.path = path;
        }
        if let Some(delimiter) = var("SALES_DASHBOARD_DELIMITER") {
            let mut chars = delimiter.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                self.data.delimiter = c;
            }
        }

        // API overrides
        if let Some(host) = var("SALES_DASHBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("SALES_DASHBOARD_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Some(dir) = var("SALES_DASHBOARD_STATIC_DIR") {
            self.api.static_dir = Some(dir);
        }

        // Display overrides
        if let Some(symbol) = var("SALES_DASHBOARD_CURRENCY") {
            self.display.currency_symbol = symbol;
        }

        // Logging overrides
        if let Some(level) = var("SALES_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SALES_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sales Dashboard Configuration
#
# Environment variables override these settings:
# - SALES_DASHBOARD_DATA_PATH
# - SALES_DASHBOARD_DELIMITER
# - SALES_DASHBOARD_API_HOST
# - SALES_DASHBOARD_API_PORT
# - SALES_DASHBOARD_STATIC_DIR
# - SALES_DASHBOARD_CURRENCY
# - SALES_DASHBOARD_LOG_LEVEL
# - SALES_DASHBOARD_LOG_FORMAT

[data]
# Delimited sales file, read once and cached until it changes
path = "base_vendas.csv"

# Field delimiter (single ASCII character)
delimiter = ","

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Directory with the built dashboard UI (trunk build output)
# static_dir = "dashboard-ui/dist"

[display]
# Prefix for currency values
currency_symbol = "R$"

# Heading of the sales dashboard page
dashboard_title = "Sales Dashboard"

# Initial zoom of the location map
map_zoom = 4.0

# Bubble radius per unit of revenue
radius_scale = 100.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.path, "base_vendas.csv");
        assert_eq!(config.data.delimiter_byte().unwrap(), b',');
        assert_eq!(config.api.addr(), "0.0.0.0:8082");
        assert_eq!(config.display.currency_symbol, "R$");
        assert_eq!(config.display.map_zoom, 4.0);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_default_config_file_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.display.radius_scale, 100.0);
        assert!(config.api.static_dir.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[data]\npath = \"sales.csv\"\ndelimiter = \";\"\n").unwrap();
        assert_eq!(config.data.path, "sales.csv");
        assert_eq!(config.data.delimiter_byte().unwrap(), b';');
        assert_eq!(config.api.port, 8082);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let data = DataConfig {
            delimiter: '§',
            ..Default::default()
        };
        assert!(matches!(data.delimiter_byte(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_latin1_delimiter_rejected() {
        // 'é' fits in a u8 but is not ASCII
        assert!(matches!(delimiter_byte('é'), Err(ConfigError::Invalid(_))));
        assert!(matches!(delimiter_byte('§'), Err(ConfigError::Invalid(_))));
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SALES_DASHBOARD_DATA_PATH", "/srv/sales.csv"),
            ("SALES_DASHBOARD_DELIMITER", "|"),
            ("SALES_DASHBOARD_API_PORT", "9000"),
            ("SALES_DASHBOARD_CURRENCY", "US$"),
            ("SALES_DASHBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data.path, "/srv/sales.csv");
        assert_eq!(config.data.delimiter, '|');
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.display.currency_symbol, "US$");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
