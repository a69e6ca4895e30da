//! Crater layers and the placement loop.
//!
//! A [`CraterLayer`] is only a rule. Instances are drawn from the PRNG one at
//! a time and handed to the caller, which encodes them immediately; nothing
//! keeps them around.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::TextureError;
use crate::prng::Xorshift64;

/// Generation rule for one batch of craters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraterLayer {
    pub count: usize,
    pub min_radius: u32,
    pub max_radius: u32,
}

impl CraterLayer {
    pub const fn new(count: usize, min_radius: u32, max_radius: u32) -> Self {
        Self {
            count,
            min_radius,
            max_radius,
        }
    }

    /// Returns `TextureError::InvalidLayer` if `min_radius > max_radius`.
    pub fn validate(&self, index: usize) -> Result<(), TextureError> {
        if self.min_radius > self.max_radius {
            return Err(TextureError::InvalidLayer {
                index,
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        Ok(())
    }

    pub fn contains_radius(&self, r: u32) -> bool {
        (self.min_radius..=self.max_radius).contains(&r)
    }
}

/// Large basins, medium craters, small craters, tiny pockmarks.
pub const DEFAULT_LAYERS: [CraterLayer; 4] = [
    CraterLayer::new(15, 60, 100),
    CraterLayer::new(40, 30, 50),
    CraterLayer::new(150, 10, 25),
    CraterLayer::new(400, 2, 8),
];

/// Range crater opacities are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityRange {
    pub min: f64,
    pub max: f64,
}

impl Default for OpacityRange {
    fn default() -> Self {
        Self { min: 0.7, max: 1.0 }
    }
}

impl OpacityRange {
    pub fn contains(&self, opacity: f64) -> bool {
        (self.min..=self.max).contains(&opacity)
    }
}

/// One placed crater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crater {
    pub cx: u32,
    pub cy: u32,
    pub r: u32,
    pub opacity: f64,
}

/// Draws `layer.count` craters from `rng`.
///
/// Centers are uniform over `[0, width] x [0, height]` and are not clamped,
/// so craters near the border get clipped by the canvas.
pub fn scatter<'a>(
    layer: &'a CraterLayer,
    canvas: Canvas,
    opacity: OpacityRange,
    rng: &'a mut Xorshift64,
) -> impl Iterator<Item = Crater> + 'a {
    (0..layer.count).map(move |_| {
        let cx = rng.next_inclusive(0, canvas.width());
        let cy = rng.next_inclusive(0, canvas.height());
        let r = rng.next_inclusive(layer.min_radius, layer.max_radius);
        let opacity = rng.next_range(opacity.min, opacity.max);
        Crater { cx, cy, r, opacity }
    })
}
