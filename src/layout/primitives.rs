//! Shape builders shared by all renderers.
//!
//! These are plain constructors: sizes and coordinates are taken as given,
//! including negative widths or heights.

use std::f32::consts::FRAC_PI_6;

use super::types::{
    ArrowShape, DiamondShape, LineShape, Primitive, RectShape, TextAnchor, TextLabel,
};

/// Distance from the arrow tip to each back corner of the head.
pub const ARROW_HEAD_LENGTH: f32 = 9.0;
/// Angle between the shaft and each side of the head.
pub const ARROW_HEAD_HALF_ANGLE: f32 = FRAC_PI_6;

pub const DEFAULT_TEXT_FILL: &str = "#111";
pub const DEFAULT_STROKE_WIDTH: f32 = 1.4;

#[allow(clippy::too_many_arguments)]
pub fn rect(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rx: f32,
    ry: f32,
    fill: &str,
    stroke: &str,
    stroke_width: f32,
) -> Primitive {
    Primitive::Rect(RectShape {
        x,
        y,
        width,
        height,
        rx,
        ry,
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        stroke_width,
    })
}

pub fn label(
    x: f32,
    y: f32,
    content: impl Into<String>,
    anchor: TextAnchor,
    font_size: f32,
    fill: &str,
    font_weight: u16,
) -> Primitive {
    Primitive::Text(TextLabel {
        x,
        y,
        content: content.into(),
        anchor,
        font_size,
        fill: fill.to_string(),
        font_weight,
    })
}

pub fn segment(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, stroke_width: f32) -> Primitive {
    Primitive::Line(line_shape(x1, y1, x2, y2, stroke, stroke_width))
}

/// A segment ending in a solid triangular head at `(x2, y2)`.
pub fn directed_segment(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: &str,
    stroke_width: f32,
) -> Primitive {
    Primitive::Arrow(ArrowShape {
        shaft: line_shape(x1, y1, x2, y2, color, stroke_width),
        head: arrow_head(x1, y1, x2, y2),
    })
}

pub fn arrow_head(x1: f32, y1: f32, x2: f32, y2: f32) -> [(f32, f32); 3] {
    let angle = (y2 - y1).atan2(x2 - x1);
    let corner = |offset: f32| {
        (
            x2 - ARROW_HEAD_LENGTH * (angle + offset).cos(),
            y2 - ARROW_HEAD_LENGTH * (angle + offset).sin(),
        )
    };
    [
        (x2, y2),
        corner(-ARROW_HEAD_HALF_ANGLE),
        corner(ARROW_HEAD_HALF_ANGLE),
    ]
}

pub fn rhombus(
    cx: f32,
    cy: f32,
    width: f32,
    height: f32,
    fill: &str,
    stroke: &str,
    stroke_width: f32,
) -> Primitive {
    Primitive::Diamond(DiamondShape {
        cx,
        cy,
        width,
        height,
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        stroke_width,
    })
}

fn line_shape(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, stroke_width: f32) -> LineShape {
    LineShape {
        x1,
        y1,
        x2,
        y2,
        stroke: stroke.to_string(),
        stroke_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn horizontal_arrow_head_is_symmetric() {
        let Primitive::Arrow(arrow) = directed_segment(0.0, 0.0, 10.0, 0.0, "#555", 1.4) else {
            panic!("expected arrow");
        };
        let [tip, upper, lower] = arrow.head;
        assert_eq!(tip, (10.0, 0.0));
        assert_approx_eq!(f32, distance(tip, upper), 9.0, epsilon = 1e-4);
        assert_approx_eq!(f32, distance(tip, lower), 9.0, epsilon = 1e-4);
        // Mirror images across the x axis.
        assert_approx_eq!(f32, upper.0, lower.0, epsilon = 1e-4);
        assert_approx_eq!(f32, upper.1, -lower.1, epsilon = 1e-4);
        assert_approx_eq!(f32, upper.0, 10.0 - 9.0 * FRAC_PI_6.cos(), epsilon = 1e-4);
        assert_approx_eq!(f32, upper.1.abs(), 4.5, epsilon = 1e-4);
    }

    #[test]
    fn leftward_arrow_head_points_left() {
        let head = arrow_head(0.0, 0.0, -20.0, 0.0);
        assert!(head[1].0 > -20.0);
        assert!(head[2].0 > -20.0);
    }

    #[test]
    fn vertical_arrow_head_sits_above_tip() {
        let head = arrow_head(0.0, 0.0, 0.0, 30.0);
        assert_approx_eq!(f32, head[1].1, 30.0 - 9.0 * FRAC_PI_6.cos(), epsilon = 1e-4);
        assert_approx_eq!(f32, head[1].0, -head[2].0, epsilon = 1e-4);
    }

    #[test]
    fn arrow_shaft_keeps_endpoints() {
        let Primitive::Arrow(arrow) = directed_segment(1.0, 2.0, 3.0, 4.0, "#000", 2.0) else {
            panic!("expected arrow");
        };
        assert_eq!((arrow.shaft.x1, arrow.shaft.y1), (1.0, 2.0));
        assert_eq!(arrow.tip(), (3.0, 4.0));
        assert_eq!(arrow.shaft.stroke_width, 2.0);
    }

    #[test]
    fn segment_has_no_head() {
        let line = segment(0.0, 0.0, 5.0, 5.0, "#999", 1.2);
        assert_eq!(line.name(), "line");
        assert_eq!(line.bounds().width(), 5.0);
    }

    #[test]
    fn negative_rect_size_is_passed_through() {
        let Primitive::Rect(shape) = rect(0.0, 0.0, -5.0, 3.0, 0.0, 0.0, "#fff", "#000", 1.0)
        else {
            panic!("expected rect");
        };
        assert_eq!(shape.width, -5.0);
    }
}
