//! Configuration for the placement API.
//!
//! Everything comes from environment variables with defaults. Tests go
//! through [`ApiConfig::from_lookup`] so they never touch the process env.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use placement_core::{CatalogParser, OrderProcessor, ProductCodeDecoder, RepairTable, SkuParser};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

/// Placement API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Reported by `/health` and in logs
    pub service_name: String,

    /// Reported by `/health`
    pub app_version: String,

    /// Tracing filter directive, used when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,

    /// HTTP listen port
    pub port: u16,

    /// Upper bound for draining in-flight requests on shutdown
    pub shutdown_timeout: Duration,

    /// TOML file replacing the built-in repair table
    pub repair_table_path: Option<PathBuf>,

    /// Extra film types the decoder accepts verbatim
    pub film_type_whitelist: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            service_name: "order-placement-system".to_string(),
            app_version: "v1.0.5".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            port: 8080,
            shutdown_timeout: Duration::from_secs(5),
            repair_table_path: None,
            film_type_whitelist: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),

            app_version: lookup("APP_VERSION").unwrap_or(defaults.app_version),

            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),

            log_format: match lookup("LOG_FORMAT") {
                Some(raw) => raw.parse()?,
                None => defaults.log_format,
            },

            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            shutdown_timeout: lookup("SHUTDOWN_TIMEOUT_SECS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue("SHUTDOWN_TIMEOUT_SECS".to_string()))?,

            repair_table_path: lookup("REPAIR_TABLE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),

            film_type_whitelist: lookup("FILM_TYPE_WHITELIST")
                .map(|raw| {
                    raw.split(',')
                        .map(|film| film.trim().to_uppercase())
                        .filter(|film| !film.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(config)
    }

    /// The repair table to inject: the file at `repair_table_path` if set,
    /// otherwise the built-in one.
    pub fn load_repair_table(&self) -> Result<RepairTable, ConfigError> {
        let Some(path) = &self.repair_table_path else {
            return Ok(RepairTable::builtin());
        };

        let repair_error = |reason: String| ConfigError::RepairTable {
            path: path.display().to_string(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| repair_error(e.to_string()))?;
        let table: RepairTable = toml::from_str(&raw).map_err(|e| repair_error(e.to_string()))?;
        table.validate().map_err(|e| repair_error(e.to_string()))?;

        tracing::info!(
            path = %path.display(),
            version = %table.version,
            models = table.models.len(),
            "Loaded repair table"
        );

        Ok(table)
    }

    /// Wires the processor from this configuration.
    pub fn build_processor(&self) -> Result<OrderProcessor, ConfigError> {
        let sku = SkuParser::new(self.load_repair_table()?);
        let decoder = ProductCodeDecoder::with_whitelist(&self.film_type_whitelist);
        Ok(OrderProcessor::new(CatalogParser::new(sku, decoder)))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot load repair table {path}: {reason}")]
    RepairTable { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("SERVICE_NAME", "placement"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
            ("SHUTDOWN_TIMEOUT_SECS", "30"),
            ("FILM_TYPE_WHITELIST", "hg1, ,XR2"),
        ]))
        .unwrap();

        assert_eq!(config.service_name, "placement");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(config.film_type_whitelist, vec!["HG1", "XR2"]);
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == "PORT"));

        let err = ApiConfig::from_lookup(lookup(&[("SHUTDOWN_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == "SHUTDOWN_TIMEOUT_SECS"));

        assert!(ApiConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_builtin_repair_table_when_unset() {
        let table = ApiConfig::default().load_repair_table().unwrap();
        assert_eq!(table, RepairTable::builtin());
    }

    #[test]
    fn test_repair_table_from_file() {
        let path = env::temp_dir().join(format!("repair-table-{}.toml", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            "version = \"test\"\ndefault_model = \"PIXEL9\"\n[models]\n\"FG0A-CLEAR\" = \"GALAXYS24\"\n",
        )
        .unwrap();

        let config = ApiConfig {
            repair_table_path: Some(path.clone()),
            ..ApiConfig::default()
        };
        let table = config.load_repair_table().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(table.version, "test");
        assert_eq!(table.repair("FG0A-CLEAR").as_deref(), Some("FG0A-CLEAR-GALAXYS24"));
    }

    #[test]
    fn test_missing_repair_table_file() {
        let config = ApiConfig {
            repair_table_path: Some(PathBuf::from("/nonexistent/repair.toml")),
            ..ApiConfig::default()
        };
        assert!(matches!(
            config.load_repair_table(),
            Err(ConfigError::RepairTable { .. })
        ));
        assert!(config.build_processor().is_err());
    }
}
