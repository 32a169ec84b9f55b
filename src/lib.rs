#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod spec;
pub mod theme;
pub mod viewport;

pub use config::{Config, LayoutConfig, RenderConfig, ViewportConfig, load_config};
pub use layout::{DiagramKind, Layout, compute_layout, wrap_text};
pub use render::{RenderedDiagram, render_svg};
pub use spec::{Spec, SpecError, parse_spec};
pub use theme::Theme;
pub use viewport::{Viewport, ViewportError, page_html, viewport_html};

/// Lays out and serializes one diagram.
pub fn render_diagram(kind: DiagramKind, spec: &Spec, config: &Config) -> RenderedDiagram {
    let layout = compute_layout(kind, spec, &config.layout);
    render_svg(&layout, &config.render)
}

/// Renders the IA, flow and decision diagrams, in that order.
pub fn render_all(spec: &Spec, config: &Config) -> Vec<RenderedDiagram> {
    DiagramKind::ALL
        .iter()
        .map(|kind| render_diagram(*kind, spec, config))
        .collect()
}

/// Parses `input` and renders one diagram with the given configuration.
pub fn render_spec(input: &str, kind: DiagramKind, config: &Config) -> Result<RenderedDiagram, SpecError> {
    let spec = parse_spec(input)?;
    Ok(render_diagram(kind, &spec, config))
}
