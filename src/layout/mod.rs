mod decision;
mod flow;
mod ia;
pub mod primitives;
mod text;
pub(crate) mod types;
pub use flow::{LanePlacement, resolve_lane};
pub use text::wrap_text;
pub use types::*;
use decision::*;
use flow::*;
use ia::*;
use primitives::*;

use crate::config::LayoutConfig;
use crate::spec::Spec;
use log::debug;

pub fn compute_layout(kind: DiagramKind, spec: &Spec, config: &LayoutConfig) -> Layout {
    let layout = match kind {
        DiagramKind::Ia => compute_ia_layout(spec, config),
        DiagramKind::Flow => compute_flow_layout(spec, config),
        DiagramKind::Decision => compute_decision_layout(spec, config),
    };

    debug!(
        kind = kind.as_str(),
        elements = layout.elements.len(),
        width = layout.width,
        height = layout.height;
        "layout computed"
    );

    layout
}

fn push(elements: &mut Vec<Element>, role: ElementRole, primitive: Primitive) {
    elements.push(Element { role, primitive });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_kind() {
        let spec = Spec::default();
        let config = LayoutConfig::default();
        for kind in DiagramKind::ALL {
            assert_eq!(compute_layout(kind, &spec, &config).kind, kind);
        }
    }

    #[test]
    fn layouts_are_deterministic() {
        let mut spec = Spec::default();
        spec.flows.items.push(crate::spec::FlowItem::default());
        let config = LayoutConfig::default();
        for kind in DiagramKind::ALL {
            let a = compute_layout(kind, &spec, &config);
            let b = compute_layout(kind, &spec, &config);
            assert_eq!(a.elements, b.elements);
            assert_eq!((a.width, a.height), (b.width, b.height));
        }
    }
}
