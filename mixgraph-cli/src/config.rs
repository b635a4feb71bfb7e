//! Configuration resolution for the mixgraph binaries
//!
//! The API key resolves through three tiers in priority order:
//! command-line flag, then the `MIXGRAPH_API_KEY` environment variable,
//! then a TOML config file. No key at all is valid and selects the public
//! v1 test endpoint. A warning is logged when more than one source
//! carries a key, since that usually means a stale config.

use clap::Parser;
use mixgraph_core::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding a premium API key
pub const API_KEY_ENV: &str = "MIXGRAPH_API_KEY";

/// Command-line arguments for the `mixgraph` binary
#[derive(Parser, Debug)]
#[command(
    name = "mixgraph",
    about = "Build an ingredient co-occurrence graph from TheCocktailDB",
    version
)]
pub struct Args {
    /// Ingredient vocabulary CSV (ingredient names as column headers)
    #[arg(long, default_value = "ingredients.csv")]
    pub ingredients: PathBuf,

    /// TheCocktailDB premium API key (selects the v2 endpoint)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Optional TOML config file (key: api_key)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output path for the ranked pair list
    #[arg(long, default_value = "ingredient_connections.csv")]
    pub edges_out: PathBuf,

    /// Output path for the dense connection matrix
    #[arg(long, default_value = "ingredient_matrix.csv")]
    pub matrix_out: PathBuf,

    /// Number of top connections to log after the run
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

/// TOML config file schema
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub api_key: Option<String>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<TomlConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub ingredients: PathBuf,
    pub edges_out: PathBuf,
    pub matrix_out: PathBuf,
    pub top: usize,
}

impl Settings {
    /// Resolve settings from the parsed arguments
    pub fn resolve(args: &Args) -> Result<Settings> {
        let toml_config = match &args.config {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        let api_key = resolve_api_key(args.api_key.as_deref(), &toml_config);

        Ok(Settings {
            api_key,
            ingredients: args.ingredients.clone(),
            edges_out: args.edges_out.clone(),
            matrix_out: args.matrix_out.clone(),
            top: args.top,
        })
    }
}

/// Resolve the API key from 3-tier configuration
///
/// Priority: CLI flag, then environment, then TOML. Absence is not an
/// error; it selects the free tier.
pub fn resolve_api_key(cli_key: Option<&str>, toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let toml_key = toml_config.api_key.as_deref();

    let mut sources = Vec::new();
    if cli_key.is_some_and(is_valid_key) {
        sources.push("command line");
    }
    if env_key.as_deref().is_some_and(is_valid_key) {
        sources.push("environment");
    }
    if toml_key.is_some_and(is_valid_key) {
        sources.push("TOML");
    }

    if sources.len() > 1 {
        warn!(
            "API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    if let Some(key) = cli_key.filter(|k| is_valid_key(k)) {
        info!("API key loaded from command line");
        return Some(key.to_string());
    }

    if let Some(key) = env_key.filter(|k| is_valid_key(k)) {
        info!("API key loaded from {} environment variable", API_KEY_ENV);
        return Some(key);
    }

    if let Some(key) = toml_key.filter(|k| is_valid_key(k)) {
        info!("API key loaded from TOML config");
        return Some(key.to_string());
    }

    None
}

/// Validate an API key (non-empty, non-whitespace)
fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_cli_key_has_highest_priority() {
        std::env::set_var(API_KEY_ENV, "env-key");
        let toml = TomlConfig {
            api_key: Some("toml-key".to_string()),
        };

        let key = resolve_api_key(Some("cli-key"), &toml);

        assert_eq!(key.as_deref(), Some("cli-key"));
        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    #[serial]
    fn test_env_key_beats_toml() {
        std::env::set_var(API_KEY_ENV, "env-key");
        let toml = TomlConfig {
            api_key: Some("toml-key".to_string()),
        };

        let key = resolve_api_key(None, &toml);

        assert_eq!(key.as_deref(), Some("env-key"));
        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    #[serial]
    fn test_toml_key_used_as_last_tier() {
        std::env::remove_var(API_KEY_ENV);
        let toml = TomlConfig {
            api_key: Some("toml-key".to_string()),
        };

        assert_eq!(resolve_api_key(None, &toml).as_deref(), Some("toml-key"));
    }

    #[test]
    #[serial]
    fn test_no_key_selects_free_tier() {
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(resolve_api_key(None, &TomlConfig::default()), None);
    }

    #[test]
    #[serial]
    fn test_blank_keys_are_ignored() {
        std::env::set_var(API_KEY_ENV, "   ");
        let toml = TomlConfig {
            api_key: Some(String::new()),
        };

        assert_eq!(resolve_api_key(Some(""), &toml), None);
        std::env::remove_var(API_KEY_ENV);
    }

    #[test]
    fn test_toml_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"api_key = \"961249867\"\n").unwrap();
        file.flush().unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("961249867"));
    }

    #[test]
    fn test_toml_config_missing_file_is_config_error() {
        let result = TomlConfig::load(Path::new("/nonexistent/mixgraph.toml"));

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
