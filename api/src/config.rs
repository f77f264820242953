//! Runtime configuration of the API binary
//!
//! Values are resolved in three layers, later ones winning:
//!
//! 1. `from_env()` defaults of every `kloom_shared::config` struct
//! 2. the optional `config/<environment>.toml` file
//! 3. `KLOOM__<SECTION>__<KEY>` variables, e.g. `KLOOM__SERVER__PORT=9000`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use kloom_shared::config::{
    AuthConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, ServerConfig,
};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "KLOOM";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Configuration from plain environment variables only
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Config {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Resolve the full layered configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::from_env();
        let file = defaults.environment.config_file().to_string();

        layered(&defaults)?
            .add_source(File::with_name(&file).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Builder seeded with `defaults` as the lowest-priority source
fn layered(defaults: &Config) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder().add_source(config::Config::try_from(defaults)?))
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
