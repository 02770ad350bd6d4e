//! Settings for the `chess-rules` command line tool, read from a YAML file
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use crate::chess::Players;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Command line settings. Every field is optional in the file.
///
/// ```yaml
/// white: Alice
/// black: Bob
/// log_file: /tmp/chess.log
/// log_level: debug
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Name of the player with the white pieces
    pub white: String,
    /// Name of the player with the black pieces
    pub black: String,
    /// File to write the log to when logging is turned on
    pub log_file: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let players = Players::default();
        Config {
            white: players.white,
            black: players.black,
            log_file: PathBuf::from("chess-rules.log"),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Parses a configuration. An empty document gives the defaults.
    pub fn from_yaml_str(s: &str) -> Result<Config, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(s)?;
        config.level_filter()?;

        Ok(config)
    }

    /// Reads the configuration file at `path`
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = read_to_string(path).map_err(|err| ConfigError::Io(path.to_owned(), err))?;
        Config::from_yaml_str(&s)
    }

    /// Reads `path` if given. Otherwise reads the default file if it exists, or returns the
    /// defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Config::load(path),
            None => match Config::default_path() {
                Some(path) if path.is_file() => Config::load(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    /// `~/.chess-rules/config.yaml`, if there is a home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".chess-rules").join("config.yaml"))
    }

    /// The player names as a `Players` value
    pub fn players(&self) -> Players {
        Players::new(self.white.as_str(), self.black.as_str())
    }

    /// The log level as a `LevelFilter`
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.log_level)
    }
}

/// Converts a log level name into a `LevelFilter`
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        level => Err(ConfigError::LogLevel(level.to_owned())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type for reading the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(PathBuf, std::io::Error),
    /// The file is not valid YAML for a `Config`
    Yaml(serde_yaml::Error),
    /// Unknown log level name
    LogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            ConfigError::Yaml(err) => write!(f, "invalid configuration: {}", err),
            ConfigError::LogLevel(level) => write!(f, "{}: invalid log level", level),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Yaml(err) => Some(err),
            ConfigError::LogLevel(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}
