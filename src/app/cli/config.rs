//! TOML configuration file parsing and loading
//!
//! Handles default config file discovery, reading, and validation of config
//! values into an `Args` that command-line values are later merged over.

use crate::core::error_handling::ContextualError;
use crate::core::validation::ValidationError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::args::{Args, ReportFormat};

const CONFIG_DIR_NAME: &str = "Spoolsuite";
const CONFIG_FILE_NAME: &str = "spoolsuite.toml";

const KNOWN_KEYS: &[&str] = &[
    "cases",
    "filter",
    "verbosity",
    "format",
    "color",
    "log-level",
    "log-format",
    "log-file",
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "ext", "json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Error in configuration file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { source, .. } => Some(source.message()),
            _ => None,
        }
    }
}

impl Args {
    /// `<config_dir>/Spoolsuite/spoolsuite.toml`, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `config_file`, or from the default location.
    ///
    /// A file named explicitly must exist. A missing default file yields
    /// default settings.
    pub fn load_config_file(config_file: Option<&Path>) -> Result<Args, ConfigError> {
        let config_path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing {
                        path: path.to_path_buf(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Self::default_config_path().filter(|p| p.exists()),
        };

        let mut args = Args::new();
        let Some(path) = config_path else {
            log::debug!("No configuration file in use");
            return Ok(args);
        };

        log::info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str::<toml::Table>(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        Self::apply_toml_values(&mut args, &config)
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(args)
    }

    /// Apply TOML configuration values to Args
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> Result<(), ValidationError> {
        for key in config.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring unknown configuration key '{}'", key);
            }
        }

        Self::apply_string_array_field(config, "cases", &mut args.cases)?;
        Self::apply_string_array_field(config, "filter", &mut args.filter)?;

        if let Some(value) = config.get("verbosity") {
            let level = value
                .as_integer()
                .filter(|level| (0..=2).contains(level))
                .ok_or_else(|| {
                    ValidationError::new(&format!(
                        "'verbosity' must be an integer from 0 to 2, got {}",
                        value
                    ))
                })?;
            args.verbosity = Some(level as i8);
        }
        if let Some(format) = Self::string_field(config, "format")? {
            let format = ReportFormat::from_str(format).map_err(|_| {
                ValidationError::new(&format!(
                    "'format' must be 'text' or 'json', got '{}'",
                    format
                ))
            })?;
            args.format = Some(format);
        }
        if let Some(value) = config.get("color") {
            let color = value.as_bool().ok_or_else(|| {
                ValidationError::new(&format!("'color' must be true or false, got {}", value))
            })?;
            args.color_setting = Some(color);
        }
        if let Some(level) = Self::choice_field(config, "log-level", LOG_LEVELS)? {
            args.log_level = Some(level);
        }
        if let Some(format) = Self::choice_field(config, "log-format", LOG_FORMATS)? {
            args.log_format = Some(format);
        }
        if let Some(log_file) = Self::string_field(config, "log-file")? {
            args.log_file = Some(PathBuf::from(log_file));
        }
        Ok(())
    }

    /// String or array of strings; entries may be comma-separated
    fn apply_string_array_field(
        config: &toml::Table,
        key: &str,
        target: &mut Vec<String>,
    ) -> Result<(), ValidationError> {
        let Some(value) = config.get(key) else {
            return Ok(());
        };

        let mut temp_strings = Vec::new();
        if let Some(str_val) = value.as_str() {
            temp_strings.push(str_val.to_string());
        } else if let Some(array_val) = value.as_array() {
            for item in array_val {
                let item_str = item.as_str().ok_or_else(|| {
                    ValidationError::new(&format!(
                        "'{}' entries must be strings, got {}",
                        key, item
                    ))
                })?;
                temp_strings.push(item_str.to_string());
            }
        } else {
            return Err(ValidationError::new(&format!(
                "'{}' must be a string or an array of strings",
                key
            )));
        }

        target.extend(Self::parse_comma_separated_strings(&temp_strings));
        Ok(())
    }

    fn string_field<'a>(
        config: &'a toml::Table,
        key: &str,
    ) -> Result<Option<&'a str>, ValidationError> {
        match config.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| ValidationError::new(&format!("'{}' must be a string", key))),
        }
    }

    fn choice_field(
        config: &toml::Table,
        key: &str,
        choices: &[&str],
    ) -> Result<Option<String>, ValidationError> {
        match Self::string_field(config, key)? {
            None => Ok(None),
            Some(value) => {
                let lowered = value.to_ascii_lowercase();
                if choices.contains(&lowered.as_str()) {
                    Ok(Some(lowered))
                } else {
                    Err(ValidationError::new(&format!(
                        "'{}' must be one of {}, got '{}'",
                        key,
                        choices.join(", "),
                        value
                    )))
                }
            }
        }
    }
}
