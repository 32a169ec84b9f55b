//! Declarative input model.
//!
//! Every record here is a plain value parsed once and then only read by the
//! layout code. References between records (component -> zone, step -> lane)
//! are string ids resolved at layout time; nothing is checked at parse time
//! beyond the canvas size.

use crate::theme::Theme;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DEFAULT_CANVAS_WIDTH: u32 = 1600;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 900;
pub const DEFAULT_LANE: &str = "Flow";

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid spec JSON5: {0}")]
    Json5(#[from] json5::Error),
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("zone {zone} has a coordinate or size outside the representable range")]
    NonFiniteGeometry { zone: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spec {
    pub project: Project,
    pub canvas: Canvas,
    pub ia: InformationArchitecture,
    pub flows: Flows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            title: "IA".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    #[serde(deserialize_with = "canvas_dimension")]
    pub width: u32,
    #[serde(deserialize_with = "canvas_dimension")]
    pub height: u32,
    pub theme: Theme,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            theme: Theme::default(),
        }
    }
}

/// Accepts whole-number floats such as `1600.0` alongside integers.
fn canvas_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "canvas size must be a whole number of pixels, got {value}"
        )));
    }
    Ok(value as u32)
}

impl Canvas {
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InformationArchitecture {
    pub scope: Vec<String>,
    pub zones: Vec<Zone>,
    pub components: Vec<Component>,
}

/// Author-placed rectangle in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Id of the owning zone. Not required to exist.
    pub zone: String,
    pub title: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flows {
    pub lanes: Vec<String>,
    pub items: Vec<FlowItem>,
    pub decisions: Vec<Decision>,
}

impl Default for Flows {
    fn default() -> Self {
        Self {
            lanes: vec![DEFAULT_LANE.to_string()],
            items: Vec::new(),
            decisions: Vec::new(),
        }
    }
}

impl Flows {
    /// Lanes used for layout. An explicitly empty list behaves like the default.
    pub fn effective_lanes(&self) -> Vec<&str> {
        if self.lanes.is_empty() {
            return vec![DEFAULT_LANE];
        }
        self.lanes.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowItem {
    pub id: String,
    pub name: String,
    pub steps: Vec<Step>,
}

impl Default for FlowItem {
    fn default() -> Self {
        Self {
            id: "FLOW".to_string(),
            name: String::new(),
            steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Lane name; `None` means the lane at the step's ordinal position.
    pub lane: Option<String>,
    pub text: String,
    pub out: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    pub id: String,
    pub cond: String,
    pub yes: String,
    pub no: String,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            id: "D-?".to_string(),
            cond: String::new(),
            yes: String::new(),
            no: String::new(),
        }
    }
}

impl Spec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SpecError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        // Numbers beyond the f32 range deserialize as infinity.
        if let Some(zone) = self
            .ia
            .zones
            .iter()
            .find(|zone| ![zone.x, zone.y, zone.w, zone.h].iter().all(|v| v.is_finite()))
        {
            return Err(SpecError::NonFiniteGeometry {
                zone: zone.id.clone(),
            });
        }
        Ok(())
    }
}

/// Parses a spec from JSON, falling back to JSON5 when the input is not
/// syntactically valid JSON (comments, trailing commas, unquoted keys).
pub fn parse_spec(input: &str) -> Result<Spec, SpecError> {
    let spec = match serde_json::from_str::<Spec>(input) {
        Ok(spec) => spec,
        Err(err) if err.is_syntax() || err.is_eof() => json5::from_str::<Spec>(input)?,
        Err(err) => return Err(err.into()),
    };
    spec.validate()?;
    Ok(spec)
}
