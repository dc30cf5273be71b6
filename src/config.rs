use std::env;
use std::error::Error;
use std::fmt;

use crate::infra::Position;

pub const DEFAULT_FLAGS: [Position; 3] = [
    Position { x: 7, y: 7 },
    Position { x: 0, y: 7 },
    Position { x: 9, y: 15 },
];

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidFlags { value: String },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidFlags { value } => {
                write!(formatter, "Invalid flag list '{}', expected x,y;x,y;...", value)
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(formatter, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionConfig {
    pub flags: Vec<Position>,
    pub maze_file: Option<String>,
    pub seed: u64,
    /// Overrides the step limit derived from the maze size when set.
    pub max_steps: Option<u32>,
    pub log_folder: Option<String>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            flags: DEFAULT_FLAGS.to_vec(),
            maze_file: None,
            seed: 0,
            max_steps: None,
            log_folder: None,
        }
    }
}

impl MissionConfig {
    /// Reads `FLAGRUNNER_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("FLAGRUNNER_FLAGS") {
            config.flags = parse_flags(&value)?;
        }
        config.maze_file = lookup("FLAGRUNNER_MAZE_FILE").filter(|path| !path.is_empty());
        if let Some(value) = lookup("FLAGRUNNER_SEED") {
            config.seed = parse_number("FLAGRUNNER_SEED", &value)?;
        }
        if let Some(value) = lookup("FLAGRUNNER_MAX_STEPS") {
            config.max_steps = Some(parse_number("FLAGRUNNER_MAX_STEPS", &value)?);
        }
        config.log_folder = lookup("FLAGRUNNER_LOG_FOLDER").filter(|path| !path.is_empty());

        Ok(config)
    }
}

/// Parses `x,y;x,y;...`. Whitespace around numbers is ignored.
pub fn parse_flags(value: &str) -> Result<Vec<Position>, ConfigError> {
    let invalid = || ConfigError::InvalidFlags {
        value: value.to_string(),
    };

    value
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
            let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
            let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
            Ok(Position::new(x, y))
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
