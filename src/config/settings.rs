//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.
//! Every field has a default, so `{}` is a valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored).
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,

    /// Optional comment field (ignored).
    #[serde(rename = "_comment", default)]
    pub comment: Option<String>,

    /// Base directory for every relative path below.
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Directory holding one sub-directory per component.
    #[serde(default = "default_components_dir")]
    pub components_dir: PathBuf,

    /// Directory holding the demo pages.
    #[serde(default = "default_demos_dir")]
    pub demos_dir: PathBuf,

    /// Where the catalog is written and read.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Module consumers import components from.
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Components whose sub-components get their own descriptors.
    #[serde(default = "default_compound_components")]
    pub compound_components: Vec<String>,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            comment: None,
            project_root: default_project_root(),
            components_dir: default_components_dir(),
            demos_dir: default_demos_dir(),
            catalog_path: default_catalog_path(),
            package_name: default_package_name(),
            compound_components: default_compound_components(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "package_name must not be empty".to_string(),
            });
        }
        if self.compound_components.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "compound_components must not contain empty names".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "server.port must be between 1 and 65535".to_string(),
            });
        }
        Ok(())
    }

    /// Catalog location resolved against the project root.
    #[must_use]
    pub fn resolved_catalog_path(&self) -> PathBuf {
        self.project_root.join(&self.catalog_path)
    }
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_components_dir() -> PathBuf {
    PathBuf::from("src/components")
}

fn default_demos_dir() -> PathBuf {
    PathBuf::from("src/pages/components")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("mcp/data/components.json")
}

fn default_package_name() -> String {
    "@/components/ui".to_string()
}

fn default_compound_components() -> Vec<String> {
    [
        "Accordion",
        "AlertDialog",
        "Card",
        "Dialog",
        "DropdownMenu",
        "Menubar",
        "Select",
        "Sheet",
        "Sidebar",
        "Table",
        "Tabs",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3100
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
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
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.components_dir, PathBuf::from("src/components"));
        assert_eq!(config.server.port, 3100);
        assert!(config.compound_components.iter().any(|c| c == "Sidebar"));
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "project_root": "/work/ui",
            "components_dir": "lib/components",
            "demos_dir": "docs/demos",
            "catalog_path": "out/catalog.json",
            "package_name": "@acme/ui",
            "compound_components": ["Tabs"],
            "server": {
                "host": "0.0.0.0",
                "port": 8080
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.resolved_catalog_path(),
            PathBuf::from("/work/ui/out/catalog.json")
        );
        assert_eq!(config.package_name, "@acme/ui");
        assert_eq!(config.compound_components, ["Tabs"]);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_empty_package_name() {
        let config: Config = serde_json::from_str(r#"{ "package_name": " " }"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_port_zero() {
        let config: Config = serde_json::from_str(r#"{ "server": { "port": 0 } }"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
