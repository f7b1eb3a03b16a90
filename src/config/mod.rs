pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "cli")]
use clap::Parser;

/// Header pair every calculator request carries unless a config file says
/// otherwise.
pub fn default_json_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "calc-client")]
#[command(about = "A small client for a remote calculator API")]
pub struct CliConfig {
    #[arg(help = "First operand, read as form text (interactive mode when omitted)")]
    pub a: Option<String>,

    #[arg(help = "Second operand, read as form text")]
    pub b: Option<String>,

    #[arg(long, default_value = "http://localhost:5000/calculator")]
    pub base_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Load service settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Resolve flags (and an optional TOML file, which wins) into the settings
    /// the client is built from.
    pub fn resolve(&self) -> Result<ClientSettings> {
        if let Some(path) = &self.config {
            return toml_config::TomlConfig::from_file(path)?.into_settings();
        }

        Ok(ClientSettings {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            headers: default_json_headers(),
        })
    }

    /// Both operands or neither; a lone operand is a usage error.
    pub fn operands(&self) -> Result<Option<(String, String)>> {
        match (&self.a, &self.b) {
            (None, None) => Ok(None),
            (a, b) => {
                let a = validation::validate_required_field("a", a)?;
                let b = validation::validate_required_field("b", b)?;
                Ok(Some((a.clone(), b.clone())))
            }
        }
    }
}

/// Settings the request client is constructed from. Application-scoped value,
/// not process-wide constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn request_headers(&self) -> HashMap<String, String> {
        self.headers.clone()
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 3600)?;

        for (name, value) in &self.headers {
            validation::validate_non_empty_string("headers", name)?;
            validation::validate_non_empty_string(&format!("headers.{}", name), value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_defaults_resolve_to_local_service() {
        let cli = CliConfig::try_parse_from(["calc-client"]).unwrap();
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.base_url, "http://localhost:5000/calculator");
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(
            settings.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            settings.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_lone_operand_is_rejected() {
        let cli = CliConfig::try_parse_from(["calc-client", "2"]).unwrap();
        assert!(cli.operands().is_err());

        let cli = CliConfig::try_parse_from(["calc-client", "2", "3"]).unwrap();
        assert_eq!(
            cli.operands().unwrap(),
            Some(("2".to_string(), "3".to_string()))
        );
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = ClientSettings {
            base_url: "http://localhost:5000/calculator".to_string(),
            timeout_seconds: 30,
            headers: default_json_headers(),
        };
        assert!(settings.validate().is_ok());

        settings.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        settings.timeout_seconds = 30;
        settings.base_url = "not-a-url".to_string();
        assert!(settings.validate().is_err());
    }
}
