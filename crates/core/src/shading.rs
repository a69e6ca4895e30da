//! The crater and regolith effects.
//!
//! Crater depth is faked with four passes over the shape's silhouette. Each
//! pass produces a thin crescent along one edge and tints it. Rather than
//! picking offset signs per pass, every offset is derived from a single
//! [`Light`] vector, the pass [`PassKind`] and the side the crescent should
//! face.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::filter::{
    ColorMatrix, CompositeOperator, Filter, FilterInput, FilterRegion, Primitive, TurbulenceKind,
};

pub const CRATER_FILTER_ID: &str = "crater";
pub const NOISE_FILTER_ID: &str = "noise";

/// Screen-space step from the surface toward the light source.
///
/// y grows downward, so the default `(-1, -1)` is light from the top left.
/// Only the sign of each component matters: a pass with distance `d` is
/// offset by `d` units along each non-zero axis, whatever the length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Light(pub DVec2);

impl Light {
    pub fn top_left() -> Self {
        Self(DVec2::new(-1.0, -1.0))
    }

    /// Per-axis sign of the light, with zero axes left at `0.0`.
    pub fn step(self) -> DVec2 {
        DVec2::new(axis_sign(self.0.x), axis_sign(self.0.y))
    }

    /// Unit step pointing at the side of a shape a crescent should occupy.
    fn toward(self, facing: Facing) -> DVec2 {
        match facing {
            Facing::Lit => self.step(),
            Facing::Shadowed => -self.step(),
        }
    }
}

fn axis_sign(c: f64) -> f64 {
    if c > 0.0 {
        1.0
    } else if c < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::top_left()
    }
}

/// How a pass carves its crescent out of the silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Offset, blur, then keep the blurred copy outside the silhouette.
    /// The crescent lies on the side the offset points to.
    Cast,
    /// Offset, keep the silhouette outside the offset copy, then blur.
    /// The crescent lies on the side opposite the offset.
    Edge,
}

/// Which side of the crater a crescent sits on, relative to the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Lit,
    Shadowed,
}

/// One shading pass of the crater filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CraterPass {
    /// Prefix of the intermediate result names (`shadowOffset`, ...).
    pub prefix: &'static str,
    /// Name of the crescent itself (`innerShadow`, ...).
    pub label: &'static str,
    pub kind: PassKind,
    pub facing: Facing,
    pub distance: f64,
    pub blur: f64,
    pub tint: Srgb,
    pub alpha: f64,
}

impl CraterPass {
    /// Offset applied to the silhouette for the given light.
    pub fn offset(&self, light: Light) -> DVec2 {
        let side = light.toward(self.facing);
        let offset = match self.kind {
            PassKind::Cast => side * self.distance,
            PassKind::Edge => -side * self.distance,
        };
        // Fold -0.0 into 0.0 so a zero axis never prints as "-0".
        offset + DVec2::ZERO
    }

    /// Name of the tinted output fed into the merge.
    pub fn output(&self) -> String {
        let mut chars = self.label.chars();
        match chars.next() {
            Some(first) => format!("final{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => "final".to_string(),
        }
    }

    fn primitives(&self, light: Light) -> Vec<Primitive> {
        let offset = self.offset(light);
        let offset_name = format!("{}Offset", self.prefix);
        let blur_name = format!("{}Blur", self.prefix);
        let offset_step = Primitive::Offset {
            input: FilterInput::SourceAlpha,
            dx: offset.x,
            dy: offset.y,
            result: offset_name.clone(),
        };
        let (crescent, steps) = match self.kind {
            PassKind::Cast => (
                self.label.to_string(),
                [
                    Primitive::GaussianBlur {
                        input: FilterInput::result(&offset_name),
                        std_deviation: self.blur,
                        result: blur_name.clone(),
                    },
                    Primitive::Composite {
                        operator: CompositeOperator::Out,
                        input: FilterInput::result(&blur_name),
                        input2: FilterInput::SourceAlpha,
                        result: self.label.to_string(),
                    },
                ],
            ),
            PassKind::Edge => {
                let mask_name = format!("{}Mask", self.prefix);
                (
                    blur_name.clone(),
                    [
                        Primitive::Composite {
                            operator: CompositeOperator::Out,
                            input: FilterInput::SourceAlpha,
                            input2: FilterInput::result(&offset_name),
                            result: mask_name.clone(),
                        },
                        Primitive::GaussianBlur {
                            input: FilterInput::result(&mask_name),
                            std_deviation: self.blur,
                            result: blur_name,
                        },
                    ],
                )
            }
        };
        let mut out = Vec::with_capacity(4);
        out.push(offset_step);
        out.extend(steps);
        out.push(Primitive::ColorMatrix {
            input: Some(FilterInput::Result(crescent)),
            matrix: ColorMatrix::tint(self.tint, self.alpha),
            result: Some(self.output()),
        });
        out
    }
}

/// The four crater passes, bottom to top: inner shadow, inner highlight,
/// rim light, rim shadow.
pub fn crater_passes(highlight: Srgb) -> [CraterPass; 4] {
    [
        CraterPass {
            prefix: "shadow",
            label: "innerShadow",
            kind: PassKind::Cast,
            facing: Facing::Shadowed,
            distance: 4.0,
            blur: 3.0,
            tint: Srgb::BLACK,
            alpha: 0.6,
        },
        CraterPass {
            prefix: "highlight",
            label: "innerHighlight",
            kind: PassKind::Cast,
            facing: Facing::Lit,
            distance: 4.0,
            blur: 3.0,
            tint: highlight,
            alpha: 0.5,
        },
        CraterPass {
            prefix: "rimLight",
            label: "rimLight",
            kind: PassKind::Edge,
            facing: Facing::Lit,
            distance: 2.0,
            blur: 1.0,
            tint: highlight,
            alpha: 0.8,
        },
        CraterPass {
            prefix: "rimShadow",
            label: "rimShadow",
            kind: PassKind::Edge,
            facing: Facing::Shadowed,
            distance: 2.0,
            blur: 1.0,
            tint: Srgb::BLACK,
            alpha: 0.3,
        },
    ]
}

/// Builds the shared crater filter from a set of passes.
pub fn crater_filter(passes: &[CraterPass], light: Light) -> Filter {
    let mut filter = Filter::new(CRATER_FILTER_ID).with_region(FilterRegion::padded());
    for pass in passes {
        for primitive in pass.primitives(light) {
            filter.push(primitive);
        }
    }
    filter.push(Primitive::Merge {
        inputs: passes
            .iter()
            .map(|p| FilterInput::Result(p.output()))
            .collect(),
    });
    debug_assert!(
        filter.dangling_inputs().is_empty(),
        "crater filter reads results before they exist: {:?}",
        filter.dangling_inputs()
    );
    filter
}

/// Fractal grain remapped to a faint black tint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regolith {
    pub base_frequency: f64,
    pub octaves: u32,
    pub alpha: f64,
}

impl Default for Regolith {
    fn default() -> Self {
        Self {
            base_frequency: 0.8,
            octaves: 3,
            alpha: 0.05,
        }
    }
}

/// Builds the full-canvas noise filter.
pub fn noise_filter(regolith: &Regolith) -> Filter {
    let mut filter = Filter::new(NOISE_FILTER_ID);
    filter.push(Primitive::Turbulence {
        kind: TurbulenceKind::FractalNoise,
        base_frequency: regolith.base_frequency,
        octaves: regolith.octaves,
        stitch: true,
    });
    filter.push(Primitive::ColorMatrix {
        input: None,
        matrix: ColorMatrix::tint(Srgb::BLACK, regolith.alpha),
        result: None,
    });
    debug_assert!(filter.dangling_inputs().is_empty());
    filter
}
