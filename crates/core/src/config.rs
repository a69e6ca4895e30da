//! Texture configuration.
//!
//! Every field has a default, and the defaults reproduce the stock moon
//! texture. Callers overlay a partial JSON object with
//! [`TextureConfig::from_json`]; missing keys keep their defaults.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canvas::{Canvas, DEFAULT_SIZE};
use crate::crater::{CraterLayer, OpacityRange, DEFAULT_LAYERS};
use crate::error::TextureError;
use crate::palette::Palette;
use crate::shading::{Light, Regolith};

/// Everything that shapes one generated texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextureConfig {
    /// Edge length of the square canvas.
    pub size: u32,
    pub palette: Palette,
    pub light: Light,
    /// Opacity of the full-canvas noise overlay.
    pub noise_opacity: f64,
    pub regolith: Regolith,
    pub crater_opacity: OpacityRange,
    /// Drawn in order; later layers sit on top.
    pub layers: Vec<CraterLayer>,
    /// Fixed PRNG seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            palette: Palette::moon(),
            light: Light::top_left(),
            noise_opacity: 0.6,
            regolith: Regolith::default(),
            crater_opacity: OpacityRange::default(),
            layers: DEFAULT_LAYERS.to_vec(),
            seed: None,
        }
    }
}

impl TextureConfig {
    /// Decodes a (possibly partial) JSON object over the defaults and validates it.
    pub fn from_json(params: &Value) -> Result<Self, TextureError> {
        let config: TextureConfig = serde_json::from_value(params.clone())
            .map_err(|e| TextureError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The canvas this config describes.
    pub fn canvas(&self) -> Result<Canvas, TextureError> {
        Canvas::square(self.size)
    }

    /// Number of circles a document built from this config contains.
    pub fn crater_count(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    /// Checks dimensions, layer ranges and opacity bounds.
    pub fn validate(&self) -> Result<(), TextureError> {
        self.canvas()?;
        for (index, layer) in self.layers.iter().enumerate() {
            layer.validate(index)?;
        }
        check_opacity("noise_opacity", self.noise_opacity)?;
        check_opacity("regolith.alpha", self.regolith.alpha)?;
        check_opacity("crater_opacity.min", self.crater_opacity.min)?;
        check_opacity("crater_opacity.max", self.crater_opacity.max)?;
        if self.crater_opacity.min > self.crater_opacity.max {
            return Err(TextureError::InvalidOpacity {
                name: "crater_opacity.min".into(),
                value: self.crater_opacity.min,
            });
        }
        if !(self.regolith.base_frequency.is_finite() && self.regolith.base_frequency >= 0.0) {
            return Err(TextureError::InvalidConfig(format!(
                "regolith.base_frequency must be a non-negative number, got {}",
                self.regolith.base_frequency
            )));
        }
        if !self.light.0.is_finite() {
            return Err(TextureError::InvalidConfig(
                "light must be a finite vector".into(),
            ));
        }
        if self.light.0 == DVec2::ZERO {
            return Err(TextureError::InvalidConfig(
                "light must point somewhere, got [0, 0]".into(),
            ));
        }
        Ok(())
    }
}

fn check_opacity(name: &str, value: f64) -> Result<(), TextureError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TextureError::InvalidOpacity {
            name: name.to_string(),
            value,
        })
    }
}
