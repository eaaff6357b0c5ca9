mod schema;

pub use schema::{Config, DEFAULT_TITLE};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked for in the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "championship.yaml";

/// Get the default config file path (./championship.yaml)
pub fn get_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses ./championship.yaml
///   when present and the built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path();
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let mut config = read_config(&config_path)?;
    config.resolve_paths(config_path.parent().unwrap_or_else(|| Path::new("")));
    Ok(config)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    /// Make input and output paths relative to the config file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        self.athletes = base.join(&self.athletes);
        self.races = base.join(&self.races);
        self.output_dir = base.join(&self.output_dir);
        if let Some(table) = &self.age_factors {
            self.age_factors = Some(base.join(table));
        }
    }
}
