//! Scene configuration, loaded once at startup.
//!
//! Every field has a default, so a partial TOML file (or none at all) is valid:
//!
//! ```toml
//! num_objects = 25
//! gravity = [0.0, -9.81, 0.0]
//! objects = ["builtin:cube", "rock.obj"]
//! ```

use crate::{
    IMPULSE_COEFFICIENT, NUM_OBJECTS, OBJECT_SCALE, PHYSICS_SCALE, SPAWN_ZONE_SIZE, TICK_INTERVAL,
    Vec3,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but cannot be used
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Render -> physics linear factor. Must be positive.
    pub physics_scale: f32,
    /// Uniform scale applied to each spawned root node.
    pub object_scale: f32,
    /// Side of the spawn cube (render units).
    pub spawn_zone_size: f32,
    pub num_objects: usize,
    pub impulse_coefficient: f32,
    /// Physics tick period in milliseconds.
    pub tick_interval_ms: u64,
    /// World gravity (physics space). Zero keeps attraction purely per-body.
    pub gravity: [f32; 3],
    /// How long the binary runs before stopping, in seconds. `0` runs until killed.
    pub run_seconds: u64,
    /// Directory OBJ assets are resolved against.
    pub asset_dir: String,
    /// Catalogue of asset names objects are picked from.
    pub objects: Vec<String>,
    /// Log a scene summary every N frames. `0` disables it.
    pub log_every_frames: u64,
    /// Fixed RNG seed for reproducible spawns.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics_scale: PHYSICS_SCALE,
            object_scale: OBJECT_SCALE,
            spawn_zone_size: SPAWN_ZONE_SIZE,
            num_objects: NUM_OBJECTS,
            impulse_coefficient: IMPULSE_COEFFICIENT,
            tick_interval_ms: TICK_INTERVAL.as_millis() as u64,
            gravity: [0.0, 0.0, 0.0],
            run_seconds: 0,
            asset_dir: "assets".to_string(),
            objects: vec![
                "builtin:tetrahedron".to_string(),
                "builtin:cube".to_string(),
                "builtin:dumbbell".to_string(),
            ],
            log_every_frames: 120,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if given, else `scene.toml` when it exists, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let fallback = Path::new("scene.toml");
                if fallback.exists() {
                    Self::load_from_file(fallback)
                } else {
                    log::info!("No scene.toml found, using default configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.physics_scale.is_finite() && self.physics_scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "physics_scale",
                reason: "must be a positive number",
            });
        }
        if !(self.spawn_zone_size.is_finite() && self.spawn_zone_size >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "spawn_zone_size",
                reason: "must be a finite, non-negative number",
            });
        }
        if !self.object_scale.is_finite() {
            return Err(ConfigError::Invalid {
                field: "object_scale",
                reason: "must be a finite number",
            });
        }
        if !self.impulse_coefficient.is_finite() {
            return Err(ConfigError::Invalid {
                field: "impulse_coefficient",
                reason: "must be a finite number",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.num_objects > 0 && self.objects.is_empty() {
            return Err(ConfigError::Invalid {
                field: "objects",
                reason: "cannot spawn objects from an empty catalogue",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }

    #[inline]
    pub fn run_duration(&self) -> Option<Duration> {
        (self.run_seconds > 0).then(|| Duration::from_secs(self.run_seconds))
    }
}
