use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_physics_dt() -> f64 {
    1.0 / 240.0
}
const fn default_control_dt() -> f64 {
    1.0 / 60.0
}
const fn default_gravity() -> [f32; 3] {
    [0.0, 0.0, -9.81]
}

// ---------------------------------------------------------------------------
// SceneConfig
// ---------------------------------------------------------------------------

/// Physics scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct SceneConfig {
    /// Physics timestep in seconds (default: 1/240).
    #[serde(default = "default_physics_dt")]
    pub physics_dt: f64,

    /// Duration of one `Scene::step` call in seconds (default: 1/60).
    /// Must be >= `physics_dt`. The ratio gives the substep count.
    #[serde(default = "default_control_dt")]
    pub control_dt: f64,

    /// Gravity vector [x, y, z] in m/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics_dt: default_physics_dt(),
            control_dt: default_control_dt(),
            gravity: default_gravity(),
        }
    }
}

impl SceneConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_dt.is_nan() || self.physics_dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.physics_dt));
        }
        if self.control_dt.is_nan() || self.control_dt < self.physics_dt {
            return Err(ConfigError::InvalidSubsteps);
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "gravity".into(),
                message: "must be finite".into(),
            });
        }
        Ok(())
    }

    /// Number of physics substeps per scene step.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn substeps(&self) -> usize {
        ((self.control_dt / self.physics_dt).round() as usize).max(1)
    }

    /// Physics rate in Hz.
    pub fn physics_hz(&self) -> f64 {
        1.0 / self.physics_dt
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
