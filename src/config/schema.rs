//! Configuration schema and defaults for pawcare.
//!
//! Defines the TOML-serializable configuration structure with the
//! `[general]`, `[web]` and `[logging]` sections. Every field has a built-in
//! default; users only set the values they want to override.
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level pawcare configuration.
///
/// Maps directly to `~/.pawcare/config.toml` and `.pawcare.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawcareConfig {
    pub general: GeneralConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Toggle position used when a request or command does not pick one, or
    /// picks one that cannot be parsed.
    pub default_scenario: Scenario,
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `pawcare serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8501".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append one JSON line per served request.
    pub enabled: bool,
    /// Request log location. A leading `~/` expands to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.pawcare/request-log.jsonl".to_string(),
        }
    }
}

impl PawcareConfig {
    /// Annotated default config, written by `pawcare config init`.
    pub fn default_toml() -> String {
        r#"# pawcare configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (PAWCARE_*)
#   2. Project config (.pawcare.toml in current directory)
#   3. User global config (~/.pawcare/config.toml)
#   4. Built-in defaults

[general]
default_scenario = "optimized"   # optimized | fragmented

[web]
addr = "127.0.0.1:8501"
open_browser = true

[logging]
enabled = true
path = "~/.pawcare/request-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = PawcareConfig::default();
        assert_eq!(config.general.default_scenario, Scenario::Optimized);
        assert_eq!(config.web.addr, "127.0.0.1:8501");
        assert!(config.web.open_browser);
        assert!(config.logging.enabled);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[general]
default_scenario = "fragmented"
"#;
        let config: PawcareConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_scenario, Scenario::Fragmented);
        assert_eq!(config.web, WebConfig::default());
    }

    #[test]
    fn deserialize_full_toml() {
        let toml_str = r#"
[general]
default_scenario = "fragmented"

[web]
addr = "0.0.0.0:9000"
open_browser = false

[logging]
enabled = false
path = "/tmp/pawcare.jsonl"
"#;
        let config: PawcareConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.web.addr, "0.0.0.0:9000");
        assert!(!config.web.open_browser);
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.path, "/tmp/pawcare.jsonl");
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: PawcareConfig = toml::from_str("").unwrap();
        assert_eq!(config, PawcareConfig::default());
    }

    #[test]
    fn default_toml_parses_back() {
        let config: PawcareConfig = toml::from_str(&PawcareConfig::default_toml()).unwrap();
        assert_eq!(config, PawcareConfig::default());
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let result: Result<PawcareConfig, _> =
            toml::from_str("[general]\ndefault_scenario = \"sideways\"\n");
        assert!(result.is_err());
    }
}
