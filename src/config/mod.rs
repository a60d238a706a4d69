//! Configuration system for pawcare.
//!
//! Provides a layered configuration hierarchy:
//!
//! 1. **Built-in defaults**: hardcoded in [`schema::PawcareConfig::default()`]
//! 2. **User global config**: `~/.pawcare/config.toml`
//! 3. **Project local config**: `.pawcare.toml` in the current working directory
//! 4. **Environment variables**: `PAWCARE_*` overrides (highest precedence)
//!
//! File layers are merged key by key: a file that only sets `web.addr`
//! leaves every other value from the previous layer in place. Files that do
//! not parse, or that hold values of the wrong type, are skipped whole.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pawcare::config;
//!
//! let cfg = config::load();
//! let scenario = cfg.general.default_scenario;
//! ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::PawcareConfig;

use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved pawcare configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> PawcareConfig {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .filter_map(load_toml_file);

    let mut config = merge_layers(layers);
    apply_env_overrides(&mut config);
    config
}

/// Fold TOML layers over the built-in defaults, later layers winning.
fn merge_layers(layers: impl IntoIterator<Item = toml::Value>) -> PawcareConfig {
    let Ok(mut merged) = toml::Value::try_from(PawcareConfig::default()) else {
        return PawcareConfig::default();
    };

    for layer in layers {
        merge_values(&mut merged, layer);
    }

    merged.try_into().unwrap_or_default()
}

/// Deep-merge `overlay` into `base`. Tables merge per key; anything else is
/// replaced.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Load one config layer as a raw TOML tree.
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content does not describe a valid config.
fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    parse_layer(&content)
}

fn parse_layer(content: &str) -> Option<toml::Value> {
    toml::from_str::<PawcareConfig>(content).ok()?;
    toml::from_str(content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.pawcare/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pawcare").join("config.toml"))
}

/// Path to the project local config: `.pawcare.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".pawcare.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `PAWCARE_SCENARIO`: default toggle position (`optimized`/`fragmented`,
///   or any boolean spelling)
/// - `PAWCARE_ADDR`: listen address for `pawcare serve`
/// - `PAWCARE_OPEN_BROWSER`: open the browser on startup
/// - `PAWCARE_LOGGING`: request log enabled
/// - `PAWCARE_LOG_PATH`: request log location
fn apply_env_overrides(config: &mut PawcareConfig) {
    if let Ok(val) = std::env::var("PAWCARE_SCENARIO")
        && let Some(scenario) = Scenario::parse(&val)
    {
        config.general.default_scenario = scenario;
    }
    if let Ok(val) = std::env::var("PAWCARE_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("PAWCARE_OPEN_BROWSER") {
        config.web.open_browser = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("PAWCARE_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("PAWCARE_LOG_PATH")
        && !val.is_empty()
    {
        config.logging.path = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.pawcare/config.toml`.
///
/// Creates the `~/.pawcare/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.pawcare/ directory")?;
    }

    fs::write(&path, PawcareConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Starts from the defaults overlaid with the current global file, updates
/// the dotted key, checks the result is still a valid config, and
/// writes it back.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root = toml::Value::try_from(PawcareConfig::default())
        .context("failed to serialize default config")?;
    if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        let existing: toml::Value =
            toml::from_str(&content).context("failed to parse config as TOML value")?;
        merge_values(&mut root, existing);
    }

    set_toml_value(&mut root, key, value)?;

    let _validated: PawcareConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("empty config key segment in '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' is not a scalar value"),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
