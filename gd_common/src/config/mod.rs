//! The config file. Every value has a default, which is documented in
//! `default.toml`, so an empty (or missing) file is a valid config.

use crate::chunk::{HeightmapKind, BUILD_Y_MIN};
use log::LevelFilter;
use serde::Deserialize;
use std::{error::Error, fmt, fs, io, path::Path, time::Duration};

#[cfg(test)]
mod tests;

/// The default config, with comments for every key.
pub const DEFAULT_SRC: &str = include_str!("default.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  pub log_level:         LevelFilter,
  pub host:              String,
  pub retries:           u32,
  pub retry_delay_ms:    u64,
  pub timeout_secs:      Option<u64>,
  pub dimension:         Option<String>,
  pub build_y_min:       i32,
  pub heightmaps:        Vec<HeightmapKind>,
  pub default_heightmap: HeightmapKind,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      log_level:         LevelFilter::Info,
      host:              "http://localhost:9000".into(),
      retries:           0,
      retry_delay_ms:    3000,
      timeout_secs:      None,
      dimension:         None,
      build_y_min:       BUILD_Y_MIN,
      heightmaps:        HeightmapKind::ALL.to_vec(),
      default_heightmap: HeightmapKind::default(),
    }
  }
}

#[derive(Debug)]
pub enum ConfigError {
  IO(io::Error),
  Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::IO(e) => write!(f, "could not read config: {e}"),
      Self::Toml(e) => write!(f, "invalid config: {e}"),
    }
  }
}

impl Error for ConfigError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::IO(e) => Some(e),
      Self::Toml(e) => Some(e),
    }
  }
}

impl Config {
  /// Loads the config at the given path. If the file doesn't exist, this will
  /// log a warning and use the default config. The warning is only visible if
  /// the logger is already set up; use [`read`](Self::read) otherwise.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    match Self::read(path)? {
      Some(config) => Ok(config),
      None => {
        warn!("no config found at `{}`, using the default config", path.display());
        Ok(Config::default())
      }
    }
  }

  /// Reads the config at the given path. Returns `None` if the file doesn't
  /// exist.
  pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
    match fs::read_to_string(path) {
      Ok(src) => Self::from_src(&src).map(Some),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(ConfigError::IO(e)),
    }
  }

  /// Parses the given toml source.
  pub fn from_src(src: &str) -> Result<Self, ConfigError> {
    toml::from_str(src).map_err(ConfigError::Toml)
  }

  /// Writes the default config to the given path. This is for users, so they
  /// can see what every key does.
  pub fn write_default(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    fs::write(path, DEFAULT_SRC).map_err(ConfigError::IO)
  }

  pub fn retry_delay(&self) -> Duration { Duration::from_millis(self.retry_delay_ms) }
  pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}
