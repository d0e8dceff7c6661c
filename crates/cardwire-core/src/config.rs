use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_ENV_PREFIX, CONFIG_FILE_NAME};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub codec: CodecConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// ## Summary
    /// Parses the configured level.
    ///
    /// ## Errors
    /// Returns an error if the level is not one of `trace`, `debug`, `info`,
    /// `warn` or `error`.
    pub fn level(&self) -> CoreResult<tracing::Level> {
        tracing::Level::from_str(self.level.trim()).map_err(|e| {
            CoreError::InvalidConfiguration(format!("logging.level `{}`: {e}", self.level))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    /// Migrate cards to vCard 4.0 when reformatting.
    pub upgrade: bool,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `cardwire.toml` (if present) and `CARDWIRE_*`
    /// environment variables into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// ## Summary
    /// Same as [`Settings::load`] with an explicit configuration file.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load_from(file: &Path) -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("codec.upgrade", false)?
            // TOML file
            .add_source(config::File::from(file).required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        tracing::debug!(file = %file.display(), level = %settings.logging.level, "Loaded configuration");
        Ok(settings)
    }

    /// ## Errors
    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> CoreResult<()> {
        self.logging.level().map(|_| ())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(file: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    match file {
        Some(file) => Settings::load_from(file),
        None => Settings::load(),
    }
}
