//! SVG encoding of elements and filter effects.
//!
//! Every tag is emitted as its own fragment; the assembler joins fragments
//! with newlines. Attributes keep insertion order and numbers use Rust's
//! shortest round-trip `Display`, so `4.0` prints as `4`.

use std::borrow::Cow;
use std::fmt::Display;

use moon_texture_core::filter::{ColorMatrix, Filter, Primitive};

/// Escapes the five XML special characters in an attribute value.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A single SVG tag with ordered attributes.
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    /// Adds the attribute only when `value` is `Some`.
    pub fn attr_opt(self, key: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    fn write_head(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }

    /// `<name .../>`
    pub fn empty(&self) -> String {
        let mut out = String::new();
        self.write_head(&mut out);
        out.push_str("/>");
        out
    }

    /// `<name ...>`
    pub fn open(&self) -> String {
        let mut out = String::new();
        self.write_head(&mut out);
        out.push('>');
        out
    }

    /// `</name>`
    pub fn close(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// Renders a color matrix as four rows of five values, rows separated by two spaces.
pub fn matrix_values(matrix: &ColorMatrix) -> String {
    matrix
        .rows()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Appends the fragments of one `<filter>` block.
pub fn encode_filter(filter: &Filter, out: &mut Vec<String>) {
    let mut head = Element::new("filter").attr("id", &filter.id);
    if let Some(region) = filter.region {
        head = head
            .attr("x", format_args!("{}%", region.x))
            .attr("y", format_args!("{}%", region.y))
            .attr("width", format_args!("{}%", region.width))
            .attr("height", format_args!("{}%", region.height));
    }
    out.push(head.open());
    for primitive in &filter.primitives {
        encode_primitive(primitive, out);
    }
    out.push(head.close());
}

fn encode_primitive(primitive: &Primitive, out: &mut Vec<String>) {
    match primitive {
        Primitive::Offset {
            input,
            dx,
            dy,
            result,
        } => out.push(
            Element::new("feOffset")
                .attr("dx", dx)
                .attr("dy", dy)
                .attr("in", input.as_str())
                .attr("result", result)
                .empty(),
        ),
        Primitive::GaussianBlur {
            input,
            std_deviation,
            result,
        } => out.push(
            Element::new("feGaussianBlur")
                .attr("stdDeviation", std_deviation)
                .attr("in", input.as_str())
                .attr("result", result)
                .empty(),
        ),
        Primitive::Composite {
            operator,
            input,
            input2,
            result,
        } => out.push(
            Element::new("feComposite")
                .attr("operator", operator.as_str())
                .attr("in", input.as_str())
                .attr("in2", input2.as_str())
                .attr("result", result)
                .empty(),
        ),
        Primitive::ColorMatrix {
            input,
            matrix,
            result,
        } => out.push(
            Element::new("feColorMatrix")
                .attr("type", "matrix")
                .attr("values", matrix_values(matrix))
                .attr_opt("in", input.as_ref().map(|i| i.as_str()))
                .attr_opt("result", result.as_deref())
                .empty(),
        ),
        Primitive::Turbulence {
            kind,
            base_frequency,
            octaves,
            stitch,
        } => out.push(
            Element::new("feTurbulence")
                .attr("type", kind.as_str())
                .attr("baseFrequency", base_frequency)
                .attr("numOctaves", octaves)
                .attr("stitchTiles", if *stitch { "stitch" } else { "noStitch" })
                .empty(),
        ),
        Primitive::Merge { inputs } => {
            let merge = Element::new("feMerge");
            out.push(merge.open());
            for input in inputs {
                out.push(
                    Element::new("feMergeNode")
                        .attr("in", input.as_str())
                        .empty(),
                );
            }
            out.push(merge.close());
        }
    }
}
