use std::path::PathBuf;
use std::str::FromStr;

use config::{Config, ConfigError, File};
use serde::Deserialize;
use timezone_client::ApiClientConfig;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub airports_path: PathBuf,
    pub itinerary_path: PathBuf,
    #[serde(with = "humantime_serde")]
    pub leg_timeout: std::time::Duration,
    pub timezone_api: ApiClientConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT")
            .ok()
            .as_deref()
            .unwrap_or("local")
            .parse::<Environment>()
            .map_err(|e| ConfigError::Message(e))?;

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("FLIGHT_ENGINE").separator("__"))
            .set_override("environment", environment.as_str())?
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Environment {
    Test,
    Local,
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "Test",
            Environment::Local => "Local",
            Environment::Development => "Development",
            Environment::Production => "Production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "local" => Ok(Environment::Local),
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(format!("unknown environment: {s}")),
        }
    }
}
