use super::*;
use crate::config::DecisionConfig;
use crate::theme::BranchPalette;

pub(super) fn compute_decision_layout(spec: &Spec, config: &LayoutConfig) -> Layout {
    let cfg = &config.decision;
    let decisions = &spec.flows.decisions;
    let rows = decisions.len().max(1);
    let height = cfg.header_height + rows as f32 * cfg.row_height;
    let yes = BranchPalette::yes();
    let no = BranchPalette::no();
    let half_diamond = cfg.diamond_width / 2.0;
    let mut elements = Vec::new();

    push(
        &mut elements,
        ElementRole::Heading,
        label(32.0, 40.0, "Decision Points", TextAnchor::Start, 22.0, DEFAULT_TEXT_FILL, 600),
    );

    let cx = cfg.anchor_x;
    for (idx, decision) in decisions.iter().enumerate() {
        let cy = cfg.first_row_y + idx as f32 * cfg.row_height;
        push(
            &mut elements,
            ElementRole::DecisionNode,
            rhombus(
                cx,
                cy,
                cfg.diamond_width,
                cfg.diamond_height,
                &cfg.diamond_fill,
                &cfg.diamond_stroke,
                DEFAULT_STROKE_WIDTH,
            ),
        );
        push(
            &mut elements,
            ElementRole::DecisionLabel,
            label(cx, cy - 8.0, decision.id.as_str(), TextAnchor::Middle, 14.0, DEFAULT_TEXT_FILL, 700),
        );
        push(
            &mut elements,
            ElementRole::DecisionLabel,
            label(cx, cy + 18.0, decision.cond.as_str(), TextAnchor::Middle, 12.0, DEFAULT_TEXT_FILL, 400),
        );

        let yes_x = cx + cfg.branch_offset;
        push_branch(&mut elements, ElementRole::YesBranch, yes_x, cy, &decision.yes, &yes, cfg);
        push(
            &mut elements,
            ElementRole::BranchConnector,
            directed_segment(cx + half_diamond, cy, yes_x, cy, &yes.arrow, DEFAULT_STROKE_WIDTH),
        );

        let no_x = cx - cfg.branch_offset - cfg.branch_width;
        push_branch(&mut elements, ElementRole::NoBranch, no_x, cy, &decision.no, &no, cfg);
        push(
            &mut elements,
            ElementRole::BranchConnector,
            directed_segment(
                cx - half_diamond,
                cy,
                cx - cfg.branch_offset,
                cy,
                &no.arrow,
                DEFAULT_STROKE_WIDTH,
            ),
        );
    }

    // Widen narrow canvases so the yes branch is never cut off.
    let width = spec
        .canvas
        .width_f32()
        .max(cfg.anchor_x + cfg.branch_offset + cfg.branch_width);

    Layout {
        kind: DiagramKind::Decision,
        width,
        height,
        background: spec.canvas.theme.bg.clone(),
        elements,
    }
}

fn push_branch(
    elements: &mut Vec<Element>,
    role: ElementRole,
    x: f32,
    cy: f32,
    outcome: &str,
    palette: &BranchPalette,
    cfg: &DecisionConfig,
) {
    push(
        elements,
        role,
        rect(
            x,
            cy - cfg.branch_height / 2.0,
            cfg.branch_width,
            cfg.branch_height,
            12.0,
            12.0,
            &palette.fill,
            &palette.stroke,
            DEFAULT_STROKE_WIDTH,
        ),
    );
    push(
        elements,
        ElementRole::BranchLabel,
        label(x + cfg.branch_width / 2.0, cy + 6.0, outcome, TextAnchor::Middle, 13.0, DEFAULT_TEXT_FILL, 400),
    );
}
