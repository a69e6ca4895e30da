//! Filter effects modeled as data.
//!
//! A [`Filter`] is an ordered chain of [`Primitive`]s, each reading from the
//! shape's silhouette or from a named earlier result. Nothing here knows how
//! the chain is serialized; the document crate encodes it.

use crate::color::Srgb;

/// Where a primitive reads its pixels from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    SourceGraphic,
    SourceAlpha,
    /// Output of an earlier primitive, by result name.
    Result(String),
}

impl FilterInput {
    pub fn result(name: impl Into<String>) -> Self {
        FilterInput::Result(name.into())
    }

    /// The reference as it appears in an `in`/`in2` attribute.
    pub fn as_str(&self) -> &str {
        match self {
            FilterInput::SourceGraphic => "SourceGraphic",
            FilterInput::SourceAlpha => "SourceAlpha",
            FilterInput::Result(name) => name,
        }
    }
}

/// Porter-Duff operator of a composite primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOperator {
    Over,
    In,
    Out,
    Atop,
    Xor,
}

impl CompositeOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeOperator::Over => "over",
            CompositeOperator::In => "in",
            CompositeOperator::Out => "out",
            CompositeOperator::Atop => "atop",
            CompositeOperator::Xor => "xor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurbulenceKind {
    FractalNoise,
    Turbulence,
}

impl TurbulenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TurbulenceKind::FractalNoise => "fractalNoise",
            TurbulenceKind::Turbulence => "turbulence",
        }
    }
}

/// A 4x5 color matrix in row-major order (R, G, B, A rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [f64; 20]);

impl ColorMatrix {
    /// Replaces every pixel's color with `color` and scales its alpha by `alpha`.
    pub fn tint(color: Srgb, alpha: f64) -> Self {
        #[rustfmt::skip]
        let values = [
            0.0, 0.0, 0.0, 0.0, color.r,
            0.0, 0.0, 0.0, 0.0, color.g,
            0.0, 0.0, 0.0, 0.0, color.b,
            0.0, 0.0, 0.0, alpha, 0.0,
        ];
        Self(values)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.0.chunks(5)
    }

    /// The alpha scale of a tint matrix.
    pub fn alpha(&self) -> f64 {
        self.0[18]
    }
}

/// One step of a filter chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Offset {
        input: FilterInput,
        dx: f64,
        dy: f64,
        result: String,
    },
    GaussianBlur {
        input: FilterInput,
        std_deviation: f64,
        result: String,
    },
    Composite {
        operator: CompositeOperator,
        input: FilterInput,
        input2: FilterInput,
        result: String,
    },
    /// `input` and `result` may be omitted to chain implicitly from the
    /// previous primitive.
    ColorMatrix {
        input: Option<FilterInput>,
        matrix: ColorMatrix,
        result: Option<String>,
    },
    Turbulence {
        kind: TurbulenceKind,
        base_frequency: f64,
        octaves: u32,
        stitch: bool,
    },
    /// Stacks inputs bottom to top.
    Merge { inputs: Vec<FilterInput> },
}

impl Primitive {
    /// The named result this primitive produces, if any.
    pub fn result(&self) -> Option<&str> {
        match self {
            Primitive::Offset { result, .. }
            | Primitive::GaussianBlur { result, .. }
            | Primitive::Composite { result, .. } => Some(result.as_str()),
            Primitive::ColorMatrix { result, .. } => result.as_deref(),
            Primitive::Turbulence { .. } | Primitive::Merge { .. } => None,
        }
    }
}

/// Filter effect region, in percent of the shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FilterRegion {
    /// A region padded by half the bounding box on every side, so offset and
    /// blurred copies of the shape are not cropped.
    pub fn padded() -> Self {
        Self {
            x: -50.0,
            y: -50.0,
            width: 200.0,
            height: 200.0,
        }
    }
}

/// A named, reusable filter effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: String,
    pub region: Option<FilterRegion>,
    pub primitives: Vec<Primitive>,
}

impl Filter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region: None,
            primitives: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: FilterRegion) -> Self {
        self.region = Some(region);
        self
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// The `url(#id)` reference shapes use to apply this filter.
    pub fn reference(&self) -> String {
        format!("url(#{})", self.id)
    }

    /// Checks that every `Result` input names an earlier primitive's result.
    pub fn dangling_inputs(&self) -> Vec<String> {
        let mut defined: Vec<&str> = Vec::new();
        let mut dangling = Vec::new();
        for primitive in &self.primitives {
            let inputs: Vec<&FilterInput> = match primitive {
                Primitive::Offset { input, .. } | Primitive::GaussianBlur { input, .. } => {
                    vec![input]
                }
                Primitive::Composite { input, input2, .. } => vec![input, input2],
                Primitive::ColorMatrix { input, .. } => input.iter().collect(),
                Primitive::Turbulence { .. } => Vec::new(),
                Primitive::Merge { inputs } => inputs.iter().collect(),
            };
            for input in inputs {
                if let FilterInput::Result(name) = input {
                    if !defined.contains(&name.as_str()) {
                        dangling.push(name.clone());
                    }
                }
            }
            if let Some(result) = primitive.result() {
                defined.push(result);
            }
        }
        dangling
    }
}
