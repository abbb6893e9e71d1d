//! Render configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! width = 1024
//! height = 1024
//! mode = "flat"
//! light_direction = [0.0, -1.0, -1.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::render::RenderMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Largest accepted frame buffer side, in pixels.
pub const MAX_DIMENSION: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame buffer width in pixels; also the projection scale.
    pub width: u32,
    pub height: u32,
    /// Camera position on the +Z axis.
    pub camera_distance: f32,
    /// Direction the light travels in.
    pub light_direction: [f32; 3],
    pub mode: RenderMode,
    /// Flip the image before saving so the origin ends up bottom-left.
    pub flip_vertically: bool,
    /// Resize the output image by this factor before saving.
    pub output_scale: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            camera_distance: 3.0,
            light_direction: [0.0, 0.0, -1.0],
            mode: RenderMode::default(),
            flip_vertically: true,
            output_scale: None,
        }
    }
}

impl RenderConfig {
    /// Reads a TOML config file. The result is not validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame buffer must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "frame buffer {}x{} exceeds {MAX_DIMENSION} pixels per side",
                self.width, self.height
            )));
        }
        if self.camera_distance == 0.0 || !self.camera_distance.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "camera_distance must be finite and non-zero, got {}",
                self.camera_distance
            )));
        }
        if self.light_vector().magnitude() == 0.0 {
            return Err(ConfigError::Invalid("light_direction must not be zero".to_string()));
        }
        if let Some(scale) = self.output_scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "output_scale must be positive, got {scale}"
                )));
            }
            let (width, height) = self.output_size();
            if width > MAX_DIMENSION || height > MAX_DIMENSION {
                return Err(ConfigError::Invalid(format!(
                    "scaled output {width}x{height} exceeds {MAX_DIMENSION} pixels per side"
                )));
            }
        }
        Ok(())
    }

    fn light_vector(&self) -> Vec3 {
        let [x, y, z] = self.light_direction;
        Vec3::new(x, y, z)
    }

    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_vector())
    }

    /// Output image size after `output_scale`, never smaller than 1x1.
    pub fn output_size(&self) -> (u32, u32) {
        match self.output_scale {
            Some(scale) => (
                ((self.width as f32 * scale) as u32).max(1),
                ((self.height as f32 * scale) as u32).max(1),
            ),
            None => (self.width, self.height),
        }
    }
}
