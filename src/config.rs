/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Hard cap on retained activity log entries.
pub const MAX_LOG_CAPACITY: usize = 50;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_elevators: u8,
    pub n_floors: u8,
    pub tick_period: u64,
    pub move_time: u64,
    pub door_open_time: u64,
    pub call_probability: f64,
    pub pickup_probability: f64,
    pub log_capacity: usize,
    pub max_passengers: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            n_elevators: 4,
            n_floors: 10,
            tick_period: 2000,
            move_time: 1000,
            door_open_time: 3000,
            call_probability: 0.3,
            pickup_probability: 0.7,
            log_capacity: MAX_LOG_CAPACITY,
            max_passengers: None,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub log_lines: usize,
    pub refresh_rate: u64,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            log_lines: 12,
            refresh_rate: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*             Public API              */
/***************************************/

/// Loads the configuration from `path`, or from `config.toml` when no path is given.
/// A missing default file is not an error and yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    if !explicit && !path.exists() {
        warn!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.simulation.validate()?;
    Ok(config)
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "n_floors must be at least 2, got {}",
                self.n_floors
            )));
        }
        if self.tick_period == 0 {
            return Err(ConfigError::Invalid("tick_period must be positive".into()));
        }
        if !(1..=MAX_LOG_CAPACITY).contains(&self.log_capacity) {
            return Err(ConfigError::Invalid(format!(
                "log_capacity must be within [1, {}], got {}",
                MAX_LOG_CAPACITY, self.log_capacity
            )));
        }
        for (name, p) in [
            ("call_probability", self.call_probability),
            ("pickup_probability", self.pickup_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
