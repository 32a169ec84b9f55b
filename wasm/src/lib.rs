use serde::Deserialize;
use ui_architect::{Config, DiagramKind, Viewport, render_spec, viewport_html};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecRenderOptions {
    margin: Option<f32>,
    font_family: Option<String>,
    zoom: Option<u32>,
    viewport_height: Option<u32>,
}

fn build_config(options: SpecRenderOptions) -> Config {
    let mut config = Config::default();
    if let Some(margin) = options.margin {
        config.render.margin = margin.max(0.0);
    }
    if let Some(font_family) = options.font_family {
        config.render.font_family = font_family;
    }
    if let Some(zoom) = options.zoom {
        config.viewport.zoom_percent = zoom;
    }
    if let Some(height) = options.viewport_height {
        config.viewport.height_px = height;
    }
    config
}

fn parse_options(options_json: Option<String>) -> Result<SpecRenderOptions, JsValue> {
    match options_json {
        Some(raw_options) => serde_json::from_str::<SpecRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(SpecRenderOptions::default()),
    }
}

fn parse_kind(kind: &str) -> Result<DiagramKind, JsValue> {
    DiagramKind::from_token(kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown diagram kind: {kind}")))
}

#[wasm_bindgen]
pub fn render_spec_svg(spec: &str, kind: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    let diagram = render_spec(spec, parse_kind(kind)?, &config)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    Ok(diagram.svg)
}

#[wasm_bindgen]
pub fn render_spec_viewport(
    spec: &str,
    kind: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    let viewport = Viewport::from_config(&config.viewport)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let diagram = render_spec(spec, parse_kind(kind)?, &config)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    Ok(viewport_html(&diagram, &viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_defaults() {
        let options: SpecRenderOptions =
            serde_json::from_str(r#"{"margin": 10, "zoom": 150, "viewportHeight": 400}"#).unwrap();
        let config = build_config(options);
        assert_eq!(config.render.margin, 10.0);
        assert_eq!(config.viewport.zoom_percent, 150);
        assert_eq!(config.viewport.height_px, 400);
    }

    #[test]
    fn renders_flow_with_default_options() {
        let spec = r#"{"flows": {"lanes": ["UI"], "items": [{"id": "F1", "steps": [{"text": "a"}, {"text": "b"}]}]}}"#;
        let config = build_config(SpecRenderOptions::default());
        let diagram = render_spec(spec, DiagramKind::Flow, &config).expect("flow should render");
        assert!(diagram.svg.contains("<svg"));
        assert!(diagram.svg.contains("class=\"connector\""));
    }
}
