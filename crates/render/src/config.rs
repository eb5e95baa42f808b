//! Renderer settings, read from JSON with every field optional.

use std::path::Path;

use geometry::GeometryKind;
use serde::{Deserialize, Serialize};

use crate::controls::KeyBindings;
use crate::error::ConfigError;
use crate::lighting::Attenuation;
use crate::march::MarchSettings;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Key binding layout, `us` or `fr`.
    pub keyboard: String,
    pub speed_translation: f64,
    pub speed_rotation: f64,
    pub max_marching_steps: usize,
    pub min_dist: f64,
    pub max_dist: f64,
    pub marching_threshold: f64,
    /// Largest single step of the local march.
    pub step_cap: f64,
    /// Field of view in degrees.
    pub fov: f64,
    pub width: u32,
    pub height: u32,
    pub stereo: bool,
    pub ipd: f64,
    pub max_fold_iterations: usize,
    pub euler_step: f64,
    /// Overrides the geometry's default light falloff.
    pub attenuation: Option<Attenuation>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            keyboard: "us".to_string(),
            speed_translation: 0.2,
            speed_rotation: 0.4,
            max_marching_steps: 50,
            min_dist: 0.0,
            max_dist: 30.0,
            marching_threshold: 0.001,
            step_cap: 0.5,
            fov: 90.0,
            width: 320,
            height: 240,
            stereo: false,
            ipd: 0.032,
            max_fold_iterations: 32,
            euler_step: geometry::DEFAULT_EULER_STEP,
            attenuation: None,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

impl RenderConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or any [`RenderConfig::validate`] error.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`RenderConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    /// # Errors
    ///
    /// The first field found out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        KeyBindings::for_layout(&self.keyboard)?;
        positive("speed_translation", self.speed_translation)?;
        positive("speed_rotation", self.speed_rotation)?;
        positive("max_dist", self.max_dist)?;
        positive("marching_threshold", self.marching_threshold)?;
        positive("step_cap", self.step_cap)?;
        positive("euler_step", self.euler_step)?;
        if !(self.min_dist >= 0.0 && self.min_dist < self.max_dist) {
            return Err(invalid("min_dist", format!("must lie in [0, {})", self.max_dist)));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(invalid("fov", format!("must lie in (0, 180) degrees, got {}", self.fov)));
        }
        if self.max_marching_steps == 0 {
            return Err(invalid("max_marching_steps", "must be at least 1"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width", "resolution must be non-zero"));
        }
        if self.stereo && self.width < 2 {
            return Err(invalid("width", "stereo needs at least two columns"));
        }
        if !(self.ipd >= 0.0 && self.ipd.is_finite()) {
            return Err(invalid("ipd", format!("must be non-negative, got {}", self.ipd)));
        }
        Ok(())
    }

    #[must_use]
    pub fn march_settings(&self) -> MarchSettings {
        MarchSettings {
            max_steps: self.max_marching_steps,
            min_dist: self.min_dist,
            max_dist: self.max_dist,
            threshold: self.marching_threshold,
            step_cap: self.step_cap,
        }
    }

    /// The configured falloff, or the usual one for `kind`.
    #[must_use]
    pub fn attenuation_for(&self, kind: GeometryKind) -> Attenuation {
        self.attenuation.unwrap_or(match kind {
            GeometryKind::Euclidean => Attenuation::InverseSquare,
            GeometryKind::Hyperbolic | GeometryKind::Nil | GeometryKind::Sol => Attenuation::Linear,
        })
    }

    /// # Errors
    ///
    /// [`ConfigError::UnknownKeyboard`] for an unknown layout name.
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        KeyBindings::for_layout(&self.keyboard)
    }
}
