//! Assembly of the moon texture document.
//!
//! The document is an ordered list of markup fragments: root and background,
//! filter definitions, the noise overlay, one circle per crater in layer
//! order, and the closing root tag. Fragments are appended once and never
//! revisited.

use moon_texture_core::crater::{scatter, Crater};
use moon_texture_core::shading::{crater_filter, crater_passes, noise_filter};
use moon_texture_core::{Canvas, Filter, Srgb, TextureConfig, TextureError, Xorshift64};
use tracing::debug;

use crate::encode::{encode_filter, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A fully assembled SVG document.
#[derive(Debug, Clone)]
pub struct Document {
    fragments: Vec<String>,
    circles: usize,
}

impl Document {
    /// Builds the texture described by `config`, drawing every random value from `rng`.
    ///
    /// Fails only if the config does not validate.
    pub fn build(config: &TextureConfig, rng: &mut Xorshift64) -> Result<Self, TextureError> {
        config.validate()?;
        let canvas = config.canvas()?;
        let crater = crater_filter(&crater_passes(config.palette.highlight), config.light);
        let noise = noise_filter(&config.regolith);

        let mut doc = Self::begin(canvas, config.palette.background, &[&crater, &noise]);
        doc.noise_overlay(&noise, config.noise_opacity);
        for (index, layer) in config.layers.iter().enumerate() {
            let before = doc.circles;
            for c in scatter(layer, canvas, config.crater_opacity, rng) {
                doc.push_crater(&c, config.palette.background, &crater);
            }
            debug!(
                layer = index,
                count = doc.circles - before,
                min_radius = layer.min_radius,
                max_radius = layer.max_radius,
                "placed crater layer"
            );
        }
        doc.finish();
        Ok(doc)
    }

    /// Root element, background rect and the `<defs>` block.
    fn begin(canvas: Canvas, background: Srgb, filters: &[&Filter]) -> Self {
        let (w, h) = (canvas.width(), canvas.height());
        let mut fragments = vec![
            Element::new("svg")
                .attr("xmlns", SVG_NS)
                .attr("viewBox", format_args!("0 0 {w} {h}"))
                .attr("width", w)
                .attr("height", h)
                .open(),
            full_canvas_rect().attr("fill", background.to_hex()).empty(),
        ];
        let defs = Element::new("defs");
        fragments.push(defs.open());
        for filter in filters {
            encode_filter(filter, &mut fragments);
            debug!(
                id = %filter.id,
                primitives = filter.primitives.len(),
                "encoded filter"
            );
        }
        fragments.push(defs.close());
        Self {
            fragments,
            circles: 0,
        }
    }

    /// Full-canvas rect carrying the regolith grain. It has no fill of its
    /// own; the filter output replaces it.
    fn noise_overlay(&mut self, noise: &Filter, opacity: f64) {
        self.fragments.push(
            full_canvas_rect()
                .attr("filter", noise.reference())
                .attr("opacity", opacity)
                .empty(),
        );
    }

    fn push_crater(&mut self, crater: &Crater, fill: Srgb, filter: &Filter) {
        self.fragments.push(
            Element::new("circle")
                .attr("cx", crater.cx)
                .attr("cy", crater.cy)
                .attr("r", crater.r)
                .attr("fill", fill.to_hex())
                .attr("filter", filter.reference())
                .attr("opacity", crater.opacity)
                .empty(),
        );
        self.circles += 1;
    }

    fn finish(&mut self) {
        self.fragments.push(Element::new("svg").close());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Number of crater circles in the document.
    pub fn circle_count(&self) -> usize {
        self.circles
    }

    /// Joins all fragments with newlines.
    pub fn render(&self) -> String {
        self.fragments.join("\n")
    }
}

fn full_canvas_rect() -> Element {
    Element::new("rect")
        .attr("width", "100%")
        .attr("height", "100%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use moon_texture_core::CraterLayer;
    use serde_json::json;

    fn build(config: &TextureConfig, seed: u64) -> Document {
        Document::build(config, &mut Xorshift64::new(seed)).unwrap()
    }

    fn attr<'a>(fragment: &'a str, name: &str) -> &'a str {
        let key = format!(" {name}=\"");
        let start = fragment
            .find(&key)
            .unwrap_or_else(|| panic!("no {name} in {fragment}"))
            + key.len();
        let len = fragment[start..].find('"').unwrap();
        &fragment[start..start + len]
    }

    fn circles(doc: &Document) -> Vec<&str> {
        doc.fragments()
            .iter()
            .filter(|f| f.starts_with("<circle "))
            .map(String::as_str)
            .collect()
    }

    fn count_prefix(doc: &Document, prefix: &str) -> usize {
        doc.fragments().iter().filter(|f| f.starts_with(prefix)).count()
    }

    /// Checks that every open tag is closed in order.
    fn assert_well_formed(svg: &str) {
        let mut stack: Vec<&str> = Vec::new();
        let mut roots = 0;
        for line in svg.lines() {
            assert!(line.starts_with('<') && line.ends_with('>'), "bad fragment {line}");
            if let Some(name) = line.strip_prefix("</") {
                let name = name.trim_end_matches('>');
                assert_eq!(stack.pop(), Some(name), "mismatched close {line}");
            } else if !line.ends_with("/>") {
                let name = line[1..].split([' ', '>']).next().unwrap();
                if stack.is_empty() {
                    roots += 1;
                }
                stack.push(name);
            } else {
                assert!(!stack.is_empty(), "element outside root: {line}");
            }
        }
        assert!(stack.is_empty(), "unclosed: {stack:?}");
        assert_eq!(roots, 1);
    }

    #[test]
    fn default_document_has_expected_structure() {
        let doc = build(&TextureConfig::default(), 42);
        let svg = doc.render();
        assert_well_formed(&svg);
        assert_eq!(count_prefix(&doc, "<svg "), 1);
        assert_eq!(count_prefix(&doc, "<rect "), 2);
        assert_eq!(count_prefix(&doc, "<filter "), 2);
        assert_eq!(count_prefix(&doc, "<defs>"), 1);
        assert_eq!(circles(&doc).len(), 605);
        assert_eq!(doc.circle_count(), 605);
        assert!(svg.contains(r#"<filter id="crater" "#));
        assert!(svg.contains(r#"<filter id="noise">"#));
    }

    #[test]
    fn root_declares_canvas_size() {
        let doc = build(&TextureConfig::default(), 1);
        assert_eq!(
            doc.fragments()[0],
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1024 1024" width="1024" height="1024">"#
        );
        assert_eq!(doc.fragments().last().unwrap(), "</svg>");
    }

    #[test]
    fn header_matches_stock_markup() {
        let doc = build(&TextureConfig::default(), 3);
        let expected = [
            r##"<rect width="100%" height="100%" fill="#e0e5ec"/>"##,
            "<defs>",
            r#"<filter id="crater" x="-50%" y="-50%" width="200%" height="200%">"#,
            r#"<feOffset dx="4" dy="4" in="SourceAlpha" result="shadowOffset"/>"#,
            r#"<feGaussianBlur stdDeviation="3" in="shadowOffset" result="shadowBlur"/>"#,
            r#"<feComposite operator="out" in="shadowBlur" in2="SourceAlpha" result="innerShadow"/>"#,
            r#"<feColorMatrix type="matrix" values="0 0 0 0 0  0 0 0 0 0  0 0 0 0 0  0 0 0 0.6 0" in="innerShadow" result="finalInnerShadow"/>"#,
            r#"<feOffset dx="-4" dy="-4" in="SourceAlpha" result="highlightOffset"/>"#,
            r#"<feGaussianBlur stdDeviation="3" in="highlightOffset" result="highlightBlur"/>"#,
            r#"<feComposite operator="out" in="highlightBlur" in2="SourceAlpha" result="innerHighlight"/>"#,
            r#"<feColorMatrix type="matrix" values="0 0 0 0 1  0 0 0 0 1  0 0 0 0 1  0 0 0 0.5 0" in="innerHighlight" result="finalInnerHighlight"/>"#,
            r#"<feOffset dx="2" dy="2" in="SourceAlpha" result="rimLightOffset"/>"#,
            r#"<feComposite operator="out" in="SourceAlpha" in2="rimLightOffset" result="rimLightMask"/>"#,
            r#"<feGaussianBlur stdDeviation="1" in="rimLightMask" result="rimLightBlur"/>"#,
            r#"<feColorMatrix type="matrix" values="0 0 0 0 1  0 0 0 0 1  0 0 0 0 1  0 0 0 0.8 0" in="rimLightBlur" result="finalRimLight"/>"#,
            r#"<feOffset dx="-2" dy="-2" in="SourceAlpha" result="rimShadowOffset"/>"#,
            r#"<feComposite operator="out" in="SourceAlpha" in2="rimShadowOffset" result="rimShadowMask"/>"#,
            r#"<feGaussianBlur stdDeviation="1" in="rimShadowMask" result="rimShadowBlur"/>"#,
            r#"<feColorMatrix type="matrix" values="0 0 0 0 0  0 0 0 0 0  0 0 0 0 0  0 0 0 0.3 0" in="rimShadowBlur" result="finalRimShadow"/>"#,
            "<feMerge>",
            r#"<feMergeNode in="finalInnerShadow"/>"#,
            r#"<feMergeNode in="finalInnerHighlight"/>"#,
            r#"<feMergeNode in="finalRimLight"/>"#,
            r#"<feMergeNode in="finalRimShadow"/>"#,
            "</feMerge>",
            "</filter>",
            r#"<filter id="noise">"#,
            r#"<feTurbulence type="fractalNoise" baseFrequency="0.8" numOctaves="3" stitchTiles="stitch"/>"#,
            r#"<feColorMatrix type="matrix" values="0 0 0 0 0  0 0 0 0 0  0 0 0 0 0  0 0 0 0.05 0"/>"#,
            "</filter>",
            "</defs>",
            r#"<rect width="100%" height="100%" filter="url(#noise)" opacity="0.6"/>"#,
        ];
        assert_eq!(&doc.fragments()[1..=expected.len()], &expected[..]);
    }

    #[test]
    fn circles_respect_layer_bounds_in_order() {
        let config = TextureConfig::default();
        let doc = build(&config, 2024);
        let all = circles(&doc);
        let mut offset = 0;
        for layer in &config.layers {
            for c in &all[offset..offset + layer.count] {
                let r: u32 = attr(c, "r").parse().unwrap();
                assert!(layer.contains_radius(r), "r={r} outside {layer:?}");
                let opacity: f64 = attr(c, "opacity").parse().unwrap();
                assert!((0.7..=1.0).contains(&opacity), "opacity={opacity}");
                for axis in ["cx", "cy"] {
                    let v: u32 = attr(c, axis).parse().unwrap();
                    assert!(v <= 1024, "{axis}={v}");
                }
                assert_eq!(attr(c, "fill"), "#e0e5ec");
                assert_eq!(attr(c, "filter"), "url(#crater)");
            }
            offset += layer.count;
        }
    }

    #[test]
    fn noise_overlay_precedes_every_crater() {
        let doc = build(&TextureConfig::default(), 5);
        let overlay = doc
            .fragments()
            .iter()
            .position(|f| f.contains("url(#noise)"))
            .unwrap();
        let first_circle = doc
            .fragments()
            .iter()
            .position(|f| f.starts_with("<circle "))
            .unwrap();
        let background = doc
            .fragments()
            .iter()
            .position(|f| f.contains("fill=\"#e0e5ec\"") && f.starts_with("<rect "))
            .unwrap();
        assert!(background < overlay && overlay < first_circle);
    }

    #[test]
    fn same_seed_is_byte_identical() {
        let config = TextureConfig::default();
        assert_eq!(build(&config, 99).render(), build(&config, 99).render());
    }

    #[test]
    fn different_seeds_share_structure_but_not_placement() {
        let config = TextureConfig::default();
        let a = build(&config, 1);
        let b = build(&config, 2);
        assert_eq!(a.fragments().len(), b.fragments().len());
        let defs_end = a.fragments().iter().position(|f| f == "</defs>").unwrap();
        assert_eq!(a.fragments()[..=defs_end], b.fragments()[..=defs_end]);
        assert_ne!(circles(&a), circles(&b));
    }

    #[test]
    fn empty_layer_contributes_nothing_and_leaves_others_alone() {
        let mut config = TextureConfig::from_json(&json!({
            "layers": [
                {"count": 4, "min_radius": 10, "max_radius": 20},
                {"count": 6, "min_radius": 2, "max_radius": 3}
            ]
        }))
        .unwrap();
        let baseline = build(&config, 8);
        config.layers.insert(1, CraterLayer::new(0, 50, 60));
        let with_empty = build(&config, 8);
        assert_eq!(with_empty.circle_count(), 10);
        assert_eq!(baseline.render(), with_empty.render());
    }

    #[test]
    fn equal_radius_bounds_fix_every_radius() {
        let config = TextureConfig::from_json(&json!({
            "layers": [{"count": 30, "min_radius": 7, "max_radius": 7}]
        }))
        .unwrap();
        let doc = build(&config, 4);
        assert!(circles(&doc).iter().all(|c| attr(c, "r") == "7"));
    }

    #[test]
    fn custom_size_is_reflected_in_root() {
        let config = TextureConfig::from_json(&json!({"size": 256})).unwrap();
        let doc = build(&config, 4);
        assert!(doc.fragments()[0].contains(r#"viewBox="0 0 256 256" width="256" height="256""#));
        for c in circles(&doc) {
            let cx: u32 = attr(c, "cx").parse().unwrap();
            assert!(cx <= 256);
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let mut config = TextureConfig::default();
        config.layers.push(CraterLayer::new(1, 9, 1));
        let err = Document::build(&config, &mut Xorshift64::new(1)).unwrap_err();
        assert!(matches!(err, TextureError::InvalidLayer { index: 4, .. }));
    }

    #[test]
    fn render_joins_with_newlines_and_no_trailing_newline() {
        let doc = build(&TextureConfig::default(), 6);
        let svg = doc.render();
        assert_eq!(svg.lines().count(), doc.fragments().len());
        assert!(!svg.ends_with('\n'));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn any_seed_yields_well_formed_document(
                seed: u64,
                counts in proptest::collection::vec(0_usize..40, 0..5),
                size in 1_u32..2048,
            ) {
                let config = TextureConfig {
                    size,
                    layers: counts.iter().map(|&n| CraterLayer::new(n, 1, 9)).collect(),
                    ..TextureConfig::default()
                };
                let doc = build(&config, seed);
                assert_well_formed(&doc.render());
                prop_assert_eq!(circles(&doc).len(), config.crater_count());
                prop_assert_eq!(count_prefix(&doc, "<filter "), 2);
            }
        }
    }
}
