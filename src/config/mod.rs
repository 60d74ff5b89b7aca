mod init;
mod schema;

pub use init::write_starter_config;
pub use schema::{ColorMode, Config, ExportConfig, LabelConfig, Labels, ScoringMethod};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/score-vault/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("score-vault"))
}

/// Get the default config file path (~/.config/score-vault/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => match get_config_path() {
            Ok(p) => p,
            Err(_) => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Validate configuration values.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref export) = config.export {
        if let Some(ref delimiter) = export.csv_delimiter {
            if delimiter.len() != 1 || !delimiter.is_ascii() {
                errors.push(format!(
                    "export.csv_delimiter: must be a single ASCII character, got '{}'",
                    delimiter
                ));
            } else if delimiter == "\"" || delimiter == "\n" || delimiter == "\r" {
                errors.push(format!(
                    "export.csv_delimiter: '{}' cannot be used as a delimiter",
                    delimiter.escape_default()
                ));
            }
        }
        if let Some(ref dir) = export.dir {
            if dir.trim().is_empty() {
                errors.push("export.dir: must not be empty".to_string());
            }
        }
    }

    if let Some(ref labels) = config.labels {
        let fields = [
            ("draw", &labels.draw),
            ("excluded", &labels.excluded),
            ("competing", &labels.competing),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if v.trim().is_empty() {
                    errors.push(format!("labels.{}: must not be empty", name));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
