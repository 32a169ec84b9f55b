use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND: &str = "#FAFAFC";

/// Colour tokens carried by `canvas.theme`. Only `bg` is consumed by the
/// renderers; the remaining tokens are kept so specs round-trip intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub bg: String,
    pub ink: String,
    pub accent: String,
    pub muted: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: DEFAULT_BACKGROUND.to_string(),
            ink: "#111111".to_string(),
            accent: "#2563EB".to_string(),
            muted: "#6B7280".to_string(),
        }
    }
}

/// Fill/stroke/arrow colours for one decision branch. These are fixed
/// conventions (green for yes, red for no) and do not follow the theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPalette {
    pub fill: String,
    pub stroke: String,
    pub arrow: String,
}

impl BranchPalette {
    pub fn yes() -> Self {
        Self {
            fill: "#EFFFF5".to_string(),
            stroke: "#49A36B".to_string(),
            arrow: "#4A9".to_string(),
        }
    }

    pub fn no() -> Self {
        Self {
            fill: "#FFF5F5".to_string(),
            stroke: "#CC6666".to_string(),
            arrow: "#C66".to_string(),
        }
    }
}
