//! Tunable geometry for the window manager and compositor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Window manager geometry settings. Every field falls back to the shell defaults.
pub struct WindowManagerConfig {
    /// Floor applied to every resize gesture's width.
    pub min_width: i32,
    /// Floor applied to every resize gesture's height.
    pub min_height: i32,
    /// Width used when an open request leaves it unset.
    pub default_width: i32,
    /// Height used when an open request leaves it unset.
    pub default_height: i32,
    /// Offset of the first cascaded window from the surface origin, on both axes.
    pub cascade_origin: i32,
    /// Per-window cascade offset, on both axes.
    pub cascade_step: i32,
    /// Number of cascade slots before positions wrap back to the origin.
    pub cascade_wrap: u32,
    /// Height reserved for the taskbar below maximized windows.
    pub taskbar_height: i32,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_width: 200,
            min_height: 120,
            default_width: 640,
            default_height: 480,
            cascade_origin: 80,
            cascade_step: 30,
            cascade_wrap: 10,
            taskbar_height: 44,
        }
    }
}

#[derive(Debug, Error)]
/// Errors raised while loading a [`WindowManagerConfig`].
pub enum ConfigError {
    /// The payload was not valid JSON for the config shape.
    #[error("window manager config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value the window manager cannot operate with.
    #[error("invalid window manager config: {0}")]
    Invalid(&'static str),
}

impl WindowManagerConfig {
    /// Parses a JSON config, filling absent fields from [`Default`], and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON or out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field constraints the window manager relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width <= 0 || self.min_height <= 0 {
            return Err(ConfigError::Invalid("minimum window size must be positive"));
        }
        if self.default_width < self.min_width || self.default_height < self.min_height {
            return Err(ConfigError::Invalid(
                "default window size must not be below the minimum size",
            ));
        }
        if self.cascade_wrap == 0 {
            return Err(ConfigError::Invalid("cascade_wrap must be at least 1"));
        }
        if self.taskbar_height < 0 {
            return Err(ConfigError::Invalid("taskbar_height must not be negative"));
        }
        Ok(())
    }
}
