use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI, Arial, Helvetica";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IaConfig {
    pub header_height: f32,
    pub header_stroke: String,
    pub scope_separator: String,
    pub zone_fill: String,
    pub zone_stroke: String,
    pub component_column_width: f32,
    pub component_card_width: f32,
    pub component_card_height: f32,
    pub component_row_height: f32,
    pub component_stroke: String,
}

impl Default for IaConfig {
    fn default() -> Self {
        Self {
            header_height: 70.0,
            header_stroke: "#D0D6E0".to_string(),
            scope_separator: " | ".to_string(),
            zone_fill: "#F3F7FF".to_string(),
            zone_stroke: "#B8C2D6".to_string(),
            component_column_width: 420.0,
            component_card_width: 392.0,
            component_card_height: 36.0,
            component_row_height: 44.0,
            component_stroke: "#E3E7EF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    pub first_item_y: f32,
    pub lane_height: f32,
    pub lane_gap: f32,
    pub lane_fill: String,
    pub lane_stroke: String,
    pub item_gap: f32,
    pub bottom_margin: f32,
    pub column_left: f32,
    /// Horizontal space not available to step columns (left offset plus right slack).
    pub column_reserved: f32,
    pub min_columns: usize,
    pub step_width: f32,
    pub step_height: f32,
    pub step_stroke: String,
    pub wrap_chars: usize,
    pub max_step_lines: usize,
    pub line_pitch: f32,
    pub arrow_color: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            first_item_y: 70.0,
            lane_height: 110.0,
            lane_gap: 12.0,
            lane_fill: "#FBFCFF".to_string(),
            lane_stroke: "#E1E6F0".to_string(),
            item_gap: 60.0,
            bottom_margin: 40.0,
            column_left: 100.0,
            column_reserved: 180.0,
            min_columns: 3,
            step_width: 240.0,
            step_height: 52.0,
            step_stroke: "#A0AEC0".to_string(),
            wrap_chars: 28,
            max_step_lines: 2,
            line_pitch: 16.0,
            arrow_color: "#6B7280".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub header_height: f32,
    pub row_height: f32,
    pub first_row_y: f32,
    pub anchor_x: f32,
    pub diamond_width: f32,
    pub diamond_height: f32,
    pub diamond_fill: String,
    pub diamond_stroke: String,
    /// Distance from the diamond centre to the near edge of each branch box.
    pub branch_offset: f32,
    pub branch_width: f32,
    pub branch_height: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            header_height: 140.0,
            row_height: 110.0,
            first_row_y: 120.0,
            anchor_x: 680.0,
            diamond_width: 200.0,
            diamond_height: 80.0,
            diamond_fill: "#FFF7E6".to_string(),
            diamond_stroke: "#C88600".to_string(),
            branch_offset: 300.0,
            branch_width: 320.0,
            branch_height: 52.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub ia: IaConfig,
    pub flow: FlowConfig,
    pub decision: DecisionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Padding added on all four sides of the content. Zero gives a document
    /// sized exactly to the declared canvas.
    pub margin: f32,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: 160.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub zoom_percent: u32,
    pub height_px: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_percent: 100,
            height_px: 800,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    margin: Option<f32>,
    font_family: Option<String>,
    wrap_chars: Option<usize>,
    max_step_lines: Option<usize>,
    min_columns: Option<usize>,
    lane_height: Option<f32>,
    lane_gap: Option<f32>,
    item_gap: Option<f32>,
    decision_row_height: Option<f32>,
    decision_anchor_x: Option<f32>,
    zoom: Option<u32>,
    viewport_height: Option<u32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.margin {
        config.render.margin = v.max(0.0);
    }
    if let Some(v) = parsed.font_family {
        config.render.font_family = v;
    }
    if let Some(v) = parsed.wrap_chars {
        config.layout.flow.wrap_chars = v;
    }
    if let Some(v) = parsed.max_step_lines {
        config.layout.flow.max_step_lines = v;
    }
    if let Some(v) = parsed.min_columns {
        config.layout.flow.min_columns = v.max(1);
    }
    if let Some(v) = parsed.lane_height {
        config.layout.flow.lane_height = v;
    }
    if let Some(v) = parsed.lane_gap {
        config.layout.flow.lane_gap = v;
    }
    if let Some(v) = parsed.item_gap {
        config.layout.flow.item_gap = v;
    }
    if let Some(v) = parsed.decision_row_height {
        config.layout.decision.row_height = v;
    }
    if let Some(v) = parsed.decision_anchor_x {
        config.layout.decision.anchor_x = v;
    }
    if let Some(v) = parsed.zoom {
        config.viewport.zoom_percent = v;
    }
    if let Some(v) = parsed.viewport_height {
        config.viewport.height_px = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render.margin, 160.0);
        assert_eq!(config.layout.flow.min_columns, 3);
        assert_eq!(config.layout.decision.row_height, 110.0);
    }

    #[test]
    fn file_overrides_selected_fields() {
        let config = parse_config(
            r#"{"margin": 0, "wrapChars": 20, "zoom": 150, "viewportHeight": 600}"#,
        )
        .unwrap();
        assert_eq!(config.render.margin, 0.0);
        assert_eq!(config.layout.flow.wrap_chars, 20);
        assert_eq!(config.layout.flow.max_step_lines, 2);
        assert_eq!(config.viewport.zoom_percent, 150);
        assert_eq!(config.viewport.height_px, 600);
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"laneHeight": 90, "minColumns": 0}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout.flow.lane_height, 90.0);
        assert_eq!(config.layout.flow.min_columns, 1);
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(parse_config("{margin:").is_err());
    }
}
