use crate::config::RenderConfig;
use crate::layout::{Bounds, DiagramKind, Element, Layout, Primitive};
use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

/// A serialized document together with its declared size.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    pub kind: DiagramKind,
    pub svg: String,
    /// Declared document width, margins included.
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl RenderedDiagram {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

/// Wraps a layout in a standalone SVG document.
///
/// The document is enlarged by `config.margin` on every side and the content
/// is translated inward by the same amount.
pub fn render_svg(layout: &Layout, config: &RenderConfig) -> RenderedDiagram {
    let margin = config.margin.max(0.0);
    let width = layout.width + 2.0 * margin;
    let height = layout.height + 2.0 * margin;

    if let Some(bounds) = clipped_bounds(layout, margin) {
        warn!(
            kind = layout.kind.as_str(),
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            max_x = bounds.max_x,
            max_y = bounds.max_y,
            margin;
            "content extends past the document edge and will be clipped"
        );
    }

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
        escape_xml(&layout.background)
    ));
    svg.push_str(&format!("<g transform=\"translate({margin:.2},{margin:.2})\">"));
    for element in &layout.elements {
        svg.push_str(&element_svg(element, &config.font_family));
    }
    svg.push_str("</g></svg>");

    debug!(kind = layout.kind.as_str(), bytes = svg.len(), width, height; "svg rendered");

    RenderedDiagram {
        kind: layout.kind,
        svg,
        width,
        height,
        margin,
    }
}

/// Content bounds when they reach past a document enlarged by `margin`.
pub fn clipped_bounds(layout: &Layout, margin: f32) -> Option<Bounds> {
    layout.content_bounds().filter(|bounds| {
        bounds.min_x < -margin
            || bounds.min_y < -margin
            || bounds.max_x > layout.width + margin
            || bounds.max_y > layout.height + margin
    })
}

pub fn element_svg(element: &Element, font_family: &str) -> String {
    primitive_svg(&element.primitive, element.role.as_class(), font_family)
}

/// Serializes one primitive. All text and colour values are escaped.
pub fn primitive_svg(primitive: &Primitive, class: &str, font_family: &str) -> String {
    match primitive {
        Primitive::Rect(rect) => format!(
            "<rect class=\"{class}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.rx,
            rect.ry,
            escape_xml(&rect.fill),
            escape_xml(&rect.stroke),
            rect.stroke_width
        ),
        Primitive::Text(text) => format!(
            "<text class=\"{class}\" x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" font-weight=\"{}\" text-anchor=\"{}\" font-family=\"{}\">{}</text>",
            text.x,
            text.y,
            text.font_size,
            escape_xml(&text.fill),
            text.font_weight,
            text.anchor.as_str(),
            escape_xml(font_family),
            escape_xml(&text.content)
        ),
        Primitive::Line(line) => line_svg(line, class),
        Primitive::Arrow(arrow) => {
            let [tip, left, right] = arrow.head;
            format!(
                "{}<path class=\"{class}\" d=\"M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} Z\" fill=\"{}\"/>",
                line_svg(&arrow.shaft, class),
                tip.0,
                tip.1,
                left.0,
                left.1,
                right.0,
                right.1,
                escape_xml(&arrow.shaft.stroke)
            )
        }
        Primitive::Diamond(diamond) => {
            let points = diamond
                .vertices()
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "<polygon class=\"{class}\" points=\"{points}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                escape_xml(&diamond.fill),
                escape_xml(&diamond.stroke),
                diamond.stroke_width
            )
        }
    }
}

fn line_svg(line: &crate::layout::LineShape, class: &str) -> String {
    format!(
        "<line class=\"{class}\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        escape_xml(&line.stroke),
        line.stroke_width
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(diagram: &RenderedDiagram, output: &Path, config: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = config
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().to_string())
        .unwrap_or_else(|| "Arial".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&diagram.svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::{ElementRole, TextAnchor, compute_layout, primitives};
    use crate::spec::Spec;

    fn layout_of(elements: Vec<Element>) -> Layout {
        Layout {
            kind: DiagramKind::Ia,
            width: 100.0,
            height: 50.0,
            background: "#FAFAFC".to_string(),
            elements,
        }
    }

    #[test]
    fn margin_expands_document_and_translates_content() {
        let config = RenderConfig {
            margin: 120.0,
            ..RenderConfig::default()
        };
        let rendered = render_svg(&layout_of(Vec::new()), &config);
        assert_eq!((rendered.width, rendered.height), (340.0, 290.0));
        assert_eq!((rendered.content_width(), rendered.content_height()), (100.0, 50.0));
        assert!(rendered.svg.contains("width=\"340.00\" height=\"290.00\""));
        assert!(rendered.svg.contains("viewBox=\"0 0 340.00 290.00\""));
        assert!(rendered.svg.contains("<g transform=\"translate(120.00,120.00)\">"));
        assert!(rendered.svg.contains("fill=\"#FAFAFC\""));
        assert!(rendered.svg.ends_with("</g></svg>"));
    }

    #[test]
    fn zone_past_the_canvas_is_reported_as_clipped() {
        let spec = crate::spec::parse_spec(
            r#"{"canvas": {"width": 400, "height": 300},
                "ia": {"zones": [{"id": "Z1", "x": 350, "y": 20, "w": 200, "h": 50}]}}"#,
        )
        .unwrap();
        let layout = compute_layout(DiagramKind::Ia, &spec, &LayoutConfig::default());
        let bounds = clipped_bounds(&layout, 0.0).expect("zone should overflow");
        assert!(bounds.max_x >= 550.0);
        assert!(bounds.max_x > render_svg(&layout, &RenderConfig { margin: 0.0, ..RenderConfig::default() }).width);
        // The default margin leaves room for the overflow.
        assert!(clipped_bounds(&layout, 160.0).is_none());
        assert!(clipped_bounds(&layout_of(Vec::new()), 0.0).is_none());
    }

    #[test]
    fn zero_margin_matches_canvas() {
        let config = RenderConfig {
            margin: 0.0,
            ..RenderConfig::default()
        };
        let rendered = render_svg(&layout_of(Vec::new()), &config);
        assert_eq!((rendered.width, rendered.height), (100.0, 50.0));
    }

    #[test]
    fn text_content_is_escaped() {
        let element = Element {
            role: ElementRole::StepLabel,
            primitive: primitives::label(0.0, 0.0, "lag>500ms & <b>\"x\"</b>", TextAnchor::Middle, 14.0, "#111", 400),
        };
        let svg = element_svg(&element, "Segoe UI");
        assert!(svg.contains(">lag&gt;500ms &amp; &lt;b&gt;&quot;x&quot;&lt;/b&gt;</text>"));
        assert!(svg.contains("class=\"step-label\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn arrow_serializes_shaft_and_filled_head() {
        let element = Element {
            role: ElementRole::Connector,
            primitive: primitives::directed_segment(0.0, 0.0, 10.0, 0.0, "#555", 1.4),
        };
        let svg = element_svg(&element, "Arial");
        assert!(svg.starts_with("<line class=\"connector\" x1=\"0.00\" y1=\"0.00\" x2=\"10.00\" y2=\"0.00\""));
        assert!(svg.contains("<path class=\"connector\" d=\"M 10.00 0.00 L "));
        assert!(svg.contains("Z\" fill=\"#555\"/>"));
    }

    #[test]
    fn diamond_serializes_as_polygon() {
        let element = Element {
            role: ElementRole::DecisionNode,
            primitive: primitives::rhombus(280.0, 120.0, 200.0, 80.0, "#FFF7E6", "#C88600", 1.4),
        };
        let svg = element_svg(&element, "Arial");
        assert!(svg.contains("points=\"280.00,80.00 380.00,120.00 280.00,160.00 180.00,120.00\""));
    }

    #[test]
    fn renders_every_kind_as_standalone_document() {
        let spec = Spec::default();
        for kind in DiagramKind::ALL {
            let layout = compute_layout(kind, &spec, &LayoutConfig::default());
            let rendered = render_svg(&layout, &RenderConfig::default());
            assert!(rendered.svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
            assert_eq!(rendered.kind, kind);
            assert_eq!(rendered.margin, 160.0);
        }
    }

    #[test]
    fn writes_svg_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        write_output_svg("<svg/>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg/>");
    }
}
