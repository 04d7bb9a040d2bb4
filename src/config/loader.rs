use crate::config::*;
use crate::error::{Error, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub wallet: WalletConfig,
    pub scanner: ScannerConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/<env>`, then `WANDER_*` variables.
    pub fn load(env: &str) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("WANDER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}
