//! Scrollable, zoomable HTML container for rendered documents.
//!
//! Zooming only scales the already-rendered SVG; geometry is never recomputed.

use crate::config::ViewportConfig;
use crate::render::{RenderedDiagram, escape_xml};
use anyhow::Result;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Slider range offered by interactive front ends.
pub const RECOMMENDED_ZOOM: RangeInclusive<u32> = 50..=250;
pub const ZOOM_STEP: u32 = 5;
pub const RECOMMENDED_HEIGHT: RangeInclusive<u32> = 300..=1400;

/// Hard limits accepted by [`Viewport::new`].
pub const ZOOM_LIMITS: RangeInclusive<u32> = 10..=1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewportError {
    #[error("zoom {0}% is outside the supported range 10-1000%")]
    Zoom(u32),
    #[error("viewport height must be at least 1px")]
    ZeroHeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    zoom_percent: u32,
    height_px: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        let config = ViewportConfig::default();
        Self {
            zoom_percent: config.zoom_percent,
            height_px: config.height_px,
        }
    }
}

impl Viewport {
    pub fn new(zoom_percent: u32, height_px: u32) -> Result<Self, ViewportError> {
        if !ZOOM_LIMITS.contains(&zoom_percent) {
            return Err(ViewportError::Zoom(zoom_percent));
        }
        if height_px == 0 {
            return Err(ViewportError::ZeroHeight);
        }
        Ok(Self {
            zoom_percent,
            height_px,
        })
    }

    pub fn from_config(config: &ViewportConfig) -> Result<Self, ViewportError> {
        Self::new(config.zoom_percent, config.height_px)
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn scale(&self) -> f32 {
        self.zoom_percent as f32 / 100.0
    }

    pub fn scaled_size(&self, width: f32, height: f32) -> (f32, f32) {
        (width * self.scale(), height * self.scale())
    }
}

/// Embeds a rendered document in a fixed-height scroll container.
///
/// The sizer takes the scaled extent so the container scrolls over the
/// whole zoomed drawing; the inner layer scales the untouched SVG from its
/// top-left corner.
pub fn viewport_html(diagram: &RenderedDiagram, viewport: &Viewport) -> String {
    let scale = viewport.scale();
    let (scaled_w, scaled_h) = viewport.scaled_size(diagram.width, diagram.height);
    format!(
        concat!(
            "<div class=\"viewport\" style=\"width:100%; border:1px solid #e3e3e3; border-radius:10px; background:#fff; overflow:auto; height:{}px;\">",
            "<div class=\"viewport-sizer\" style=\"position:relative; overflow:hidden; width:{:.2}px; height:{:.2}px;\">",
            "<div class=\"viewport-content\" style=\"transform: scale({}); transform-origin: top left; width:{:.2}px; height:{:.2}px;\">",
            "{}",
            "</div></div></div>"
        ),
        viewport.height_px(),
        scaled_w,
        scaled_h,
        scale,
        diagram.width,
        diagram.height,
        diagram.svg
    )
}

/// Standalone page with one titled viewport per diagram.
pub fn page_html(title: &str, diagrams: &[RenderedDiagram], viewport: &Viewport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str(&format!("<title>{}</title>", escape_xml(title)));
    html.push_str("</head><body style=\"font-family: Segoe UI, Arial, Helvetica; margin: 24px;\">");
    html.push_str(&format!("<h1>{}</h1>", escape_xml(title)));
    for diagram in diagrams {
        html.push_str(&format!("<h3>{}</h3>", diagram.kind.title()));
        html.push_str(&viewport_html(diagram, viewport));
    }
    html.push_str("</body></html>");
    html
}

pub fn write_output_html(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, html)?,
        None => print!("{}", html),
    }
    Ok(())
}
