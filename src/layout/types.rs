use serde::Serialize;

/// Average glyph advance relative to font size, used for text extents.
const AVERAGE_CHAR_WIDTH: f32 = 0.56;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Ia,
    Flow,
    Decision,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 3] = [DiagramKind::Ia, DiagramKind::Flow, DiagramKind::Decision];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "ia" | "zones" => Some(Self::Ia),
            "flow" | "flows" | "swimlane" => Some(Self::Flow),
            "decision" | "decisions" => Some(Self::Decision),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ia => "ia",
            Self::Flow => "flow",
            Self::Decision => "decision",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Ia => "IA Diagram",
            Self::Flow => "Flow Diagram",
            Self::Decision => "Decision Points",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rx: f32,
    pub ry: f32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f32,
    pub y: f32,
    /// Raw text; escaped only when serialized.
    pub content: String,
    pub anchor: TextAnchor,
    pub font_size: f32,
    pub fill: String,
    pub font_weight: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: String,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowShape {
    pub shaft: LineShape,
    /// Tip first, then the two back corners.
    pub head: [(f32, f32); 3],
}

impl ArrowShape {
    pub fn tip(&self) -> (f32, f32) {
        self.head[0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiamondShape {
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

impl DiamondShape {
    /// Top, right, bottom, left.
    pub fn vertices(&self) -> [(f32, f32); 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            (self.cx, self.cy - hh),
            (self.cx + hw, self.cy),
            (self.cx, self.cy + hh),
            (self.cx - hw, self.cy),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectShape),
    Text(TextLabel),
    Line(LineShape),
    Arrow(ArrowShape),
    Diamond(DiamondShape),
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Rect(_) => "rect",
            Primitive::Text(_) => "text",
            Primitive::Line(_) => "line",
            Primitive::Arrow(_) => "arrow",
            Primitive::Diamond(_) => "diamond",
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Rect(rect) => Bounds::from_rect(rect.x, rect.y, rect.width, rect.height),
            Primitive::Text(text) => {
                let width = text.content.chars().count() as f32 * text.font_size * AVERAGE_CHAR_WIDTH;
                let left = match text.anchor {
                    TextAnchor::Start => text.x,
                    TextAnchor::Middle => text.x - width / 2.0,
                    TextAnchor::End => text.x - width,
                };
                // Baseline sits at y; ascent is roughly one font size.
                Bounds::from_rect(left, text.y - text.font_size, width, text.font_size)
            }
            Primitive::Line(line) => Bounds::from_points(&[(line.x1, line.y1), (line.x2, line.y2)]),
            Primitive::Arrow(arrow) => {
                let shaft = &arrow.shaft;
                let mut points = vec![(shaft.x1, shaft.y1), (shaft.x2, shaft.y2)];
                points.extend_from_slice(&arrow.head);
                Bounds::from_points(&points)
            }
            Primitive::Diamond(diamond) => Bounds::from_points(&diamond.vertices()),
        }
    }
}

/// Semantic role of a drawn element. Serialized as the SVG `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementRole {
    Background,
    Title,
    Header,
    Heading,
    Zone,
    ZoneLabel,
    ComponentCard,
    ComponentLabel,
    Lane,
    LaneLabel,
    Step,
    StepLabel,
    StepOutput,
    UnresolvedLane,
    Connector,
    DecisionNode,
    DecisionLabel,
    YesBranch,
    NoBranch,
    BranchLabel,
    BranchConnector,
}

impl ElementRole {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Title => "title",
            Self::Header => "header",
            Self::Heading => "heading",
            Self::Zone => "zone",
            Self::ZoneLabel => "zone-label",
            Self::ComponentCard => "component-card",
            Self::ComponentLabel => "component-label",
            Self::Lane => "lane",
            Self::LaneLabel => "lane-label",
            Self::Step => "step",
            Self::StepLabel => "step-label",
            Self::StepOutput => "step-output",
            Self::UnresolvedLane => "unresolved-lane",
            Self::Connector => "connector",
            Self::DecisionNode => "decision-node",
            Self::DecisionLabel => "decision-label",
            Self::YesBranch => "yes-branch",
            Self::NoBranch => "no-branch",
            Self::BranchLabel => "branch-label",
            Self::BranchConnector => "branch-connector",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub role: ElementRole,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        // Negative sizes are passed through by the builders; normalise here.
        Self {
            min_x: x.min(x + width),
            min_y: y.min(y + height),
            max_x: x.max(x + width),
            max_y: y.max(y + height),
        }
    }

    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let mut bounds = Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        };
        for &(x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x);
            bounds.max_y = bounds.max_y.max(y);
        }
        bounds
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Output of one renderer: content size plus elements in paint order.
#[derive(Debug, Clone)]
pub struct Layout {
    pub kind: DiagramKind,
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub elements: Vec<Element>,
}

impl Layout {
    pub fn with_role(&self, role: ElementRole) -> impl Iterator<Item = &Primitive> + '_ {
        self.elements
            .iter()
            .filter(move |element| element.role == role)
            .map(|element| &element.primitive)
    }

    pub fn count_role(&self, role: ElementRole) -> usize {
        self.with_role(role).count()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &ArrowShape> + '_ {
        self.elements.iter().filter_map(|element| match &element.primitive {
            Primitive::Arrow(arrow) => Some(arrow),
            _ => None,
        })
    }

    /// Extent of everything drawn, or `None` for an empty layout.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.elements
            .iter()
            .map(|element| element.primitive.bounds())
            .reduce(Bounds::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_kind_tokens() {
        assert_eq!(DiagramKind::from_token("IA"), Some(DiagramKind::Ia));
        assert_eq!(DiagramKind::from_token("flows"), Some(DiagramKind::Flow));
        assert_eq!(DiagramKind::from_token(" decision "), Some(DiagramKind::Decision));
        assert_eq!(DiagramKind::from_token("gantt"), None);
    }

    #[test]
    fn diamond_vertices_follow_bounding_box() {
        let diamond = DiamondShape {
            cx: 10.0,
            cy: 20.0,
            width: 8.0,
            height: 4.0,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            stroke_width: 1.0,
        };
        assert_eq!(
            diamond.vertices(),
            [(10.0, 18.0), (14.0, 20.0), (10.0, 22.0), (6.0, 20.0)]
        );
    }

    #[test]
    fn negative_rect_bounds_are_normalised() {
        let bounds = Bounds::from_rect(10.0, 10.0, -4.0, -2.0);
        assert_eq!(bounds.min_x, 6.0);
        assert_eq!(bounds.max_y, 10.0);
        assert_eq!(bounds.width(), 4.0);
    }

    #[test]
    fn middle_anchored_text_is_centred() {
        let text = Primitive::Text(TextLabel {
            x: 100.0,
            y: 50.0,
            content: "abcd".to_string(),
            anchor: TextAnchor::Middle,
            font_size: 10.0,
            fill: "#111".to_string(),
            font_weight: 400,
        });
        let bounds = text.bounds();
        assert!((bounds.min_x + bounds.max_x - 200.0).abs() < 1e-3);
        assert_eq!(bounds.max_y, 50.0);
    }
}
