use crate::layout::{DiagramKind, ElementRole, Layout, Primitive};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: DiagramKind,
    pub width: f32,
    pub height: f32,
    pub background: String,
    /// Extent of all drawn content as `[min_x, min_y, max_x, max_y]`.
    pub content_bounds: Option<[f32; 4]>,
    pub elements: Vec<ElementDump>,
}

#[derive(Debug, Serialize)]
pub struct ElementDump {
    pub role: ElementRole,
    pub shape: &'static str,
    pub bounds: [f32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let elements = layout
            .elements
            .iter()
            .map(|element| {
                let b = element.primitive.bounds();
                let text = match &element.primitive {
                    Primitive::Text(label) => Some(label.content.clone()),
                    _ => None,
                };
                ElementDump {
                    role: element.role,
                    shape: element.primitive.name(),
                    bounds: [b.min_x, b.min_y, b.max_x, b.max_y],
                    text,
                }
            })
            .collect();

        LayoutDump {
            kind: layout.kind,
            width: layout.width,
            height: layout.height,
            background: layout.background.clone(),
            content_bounds: layout
                .content_bounds()
                .map(|b| [b.min_x, b.min_y, b.max_x, b.max_y]),
            elements,
        }
    }
}

pub fn write_layout_dump(path: &Path, layouts: &[Layout]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dumps: Vec<LayoutDump> = layouts.iter().map(LayoutDump::from_layout).collect();
    serde_json::to_writer_pretty(writer, &dumps)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::spec::parse_spec;

    #[test]
    fn dump_lists_roles_and_text() {
        let spec = parse_spec(r#"{"flows": {"decisions": [{"id": "D-01", "cond": "ok?", "yes": "go", "no": "stop"}]}}"#)
            .unwrap();
        let layout = compute_layout(DiagramKind::Decision, &spec, &LayoutConfig::default());
        let dump = LayoutDump::from_layout(&layout);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["kind"], "decision");
        assert_eq!(json["height"], 250.0);
        let roles: Vec<_> = json["elements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["role"].as_str().unwrap().to_string())
            .collect();
        assert!(roles.contains(&"decision-node".to_string()));
        assert!(roles.contains(&"yes-branch".to_string()));
        let texts: Vec<_> = dump.elements.iter().filter_map(|e| e.text.clone()).collect();
        assert!(texts.contains(&"stop".to_string()));
    }

    #[test]
    fn writes_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = compute_layout(DiagramKind::Ia, &Default::default(), &LayoutConfig::default());
        write_layout_dump(&path, &[layout]).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["kind"], "ia");
    }
}
