/// Startup constants: tick interval, board and sprite sizes, bullet speed.
///
/// Read once at startup from an optional TOML file; every key falls back to
/// its default, so an empty file is a valid configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::geometry::{Size, Velocity};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation step, ≈60 Hz by default.
    pub tick_interval_ms: u64,
    pub board: Size,
    pub shooter: Size,
    pub bullet: Size,
    /// Units per second; positive y is upward.
    pub bullet_speed: Velocity,
    /// Shooter starts at `board.height / shooter_height_divisor`.
    pub shooter_height_divisor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            board: Size::new(400.0, 600.0),
            shooter: Size::new(40.0, 40.0),
            bullet: Size::new(8.0, 8.0),
            bullet_speed: Velocity::new(0.0, 450.0),
            shooter_height_divisor: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroTickInterval,
    NonPositiveSize { field: &'static str },
    NonPositiveDivisor,
    NonFinite { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTickInterval => write!(f, "tick_interval_ms must be at least 1"),
            ConfigError::NonPositiveSize { field } => {
                write!(f, "{field} width and height must be positive")
            }
            ConfigError::NonPositiveDivisor => {
                write!(f, "shooter_height_divisor must be positive")
            }
            ConfigError::NonFinite { field } => write!(f, "{field} must be a finite number"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let sizes = [
            ("board", self.board),
            ("shooter", self.shooter),
            ("bullet", self.bullet),
        ];
        for (field, size) in sizes {
            if !(size.width.is_finite() && size.height.is_finite()) {
                return Err(ConfigError::NonFinite { field });
            }
            if size.width <= 0.0 || size.height <= 0.0 {
                return Err(ConfigError::NonPositiveSize { field });
            }
        }
        if !(self.bullet_speed.x.is_finite() && self.bullet_speed.y.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "bullet_speed",
            });
        }
        if !self.shooter_height_divisor.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "shooter_height_divisor",
            });
        }
        if self.shooter_height_divisor <= 0.0 {
            return Err(ConfigError::NonPositiveDivisor);
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: GameConfig = toml::from_str(raw).context("parse config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("load config {}", path.display()))
    }

    /// Defaults when no path is given; a given path must load.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
