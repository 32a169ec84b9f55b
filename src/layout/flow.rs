use log::debug;

use super::*;
use crate::spec::Step;

const HEADING_X: f32 = 32.0;
const LANE_X: f32 = 28.0;
const OUTPUT_LABEL_OFFSET: f32 = 28.0;
const UNRESOLVED_LANE_FILL: &str = "#B42318";

/// Where a step lands among the lanes of its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePlacement<'a> {
    pub index: usize,
    /// Lane name the step asked for when no lane carries it.
    pub unresolved: Option<&'a str>,
}

/// Resolves the lane a step is drawn in.
///
/// An explicit lane name wins when it is known; otherwise the step falls back
/// to the lane at its ordinal position, clamped to the last lane, and the
/// unknown name is reported back so it can still be drawn.
pub fn resolve_lane<'a>(step: &'a Step, ordinal: usize, lanes: &[&str]) -> LanePlacement<'a> {
    let positional = ordinal.min(lanes.len().saturating_sub(1));
    let Some(name) = step.lane.as_deref() else {
        return LanePlacement {
            index: positional,
            unresolved: None,
        };
    };
    // Duplicate lane names resolve to the last band with that name.
    match lanes.iter().rposition(|lane| *lane == name) {
        Some(index) => LanePlacement {
            index,
            unresolved: None,
        },
        None => {
            debug!(lane = name, ordinal; "step references unknown lane, using positional lane");
            LanePlacement {
                index: positional,
                unresolved: Some(name),
            }
        }
    }
}

pub(super) fn compute_flow_layout(spec: &Spec, config: &LayoutConfig) -> Layout {
    let cfg = &config.flow;
    let width = spec.canvas.width_f32();
    let lanes = spec.flows.effective_lanes();
    let lane_pitch = cfg.lane_height + cfg.lane_gap;
    let half_step_w = cfg.step_width / 2.0;
    let half_step_h = cfg.step_height / 2.0;
    let mut elements = Vec::new();

    push(
        &mut elements,
        ElementRole::Heading,
        label(HEADING_X, 40.0, "Flows (Swimlanes)", TextAnchor::Start, 22.0, DEFAULT_TEXT_FILL, 600),
    );

    let mut cursor = cfg.first_item_y;
    for item in &spec.flows.items {
        push(
            &mut elements,
            ElementRole::Heading,
            label(
                HEADING_X,
                cursor - 12.0,
                format!("{} - {}", item.id, item.name),
                TextAnchor::Start,
                18.0,
                DEFAULT_TEXT_FILL,
                700,
            ),
        );

        let mut lane_centers = Vec::with_capacity(lanes.len());
        for (idx, lane) in lanes.iter().enumerate() {
            let top = cursor + idx as f32 * lane_pitch;
            lane_centers.push(top + cfg.lane_height / 2.0);
            push(
                &mut elements,
                ElementRole::Lane,
                rect(
                    LANE_X,
                    top,
                    width - 2.0 * LANE_X,
                    cfg.lane_height,
                    12.0,
                    12.0,
                    &cfg.lane_fill,
                    &cfg.lane_stroke,
                    DEFAULT_STROKE_WIDTH,
                ),
            );
            push(
                &mut elements,
                ElementRole::LaneLabel,
                label(40.0, top + 24.0, *lane, TextAnchor::Start, 14.0, DEFAULT_TEXT_FILL, 600),
            );
        }

        let columns = item.steps.len().max(cfg.min_columns).max(1);
        let column_width = (width - cfg.column_reserved) / columns as f32;
        let mut previous: Option<(f32, f32)> = None;
        for (idx, step) in item.steps.iter().enumerate() {
            let placement = resolve_lane(step, idx, &lanes);
            let cx = cfg.column_left + column_width * (idx as f32 + 0.5);
            let cy = lane_centers[placement.index];

            push(
                &mut elements,
                ElementRole::Step,
                rect(
                    cx - half_step_w,
                    cy - half_step_h,
                    cfg.step_width,
                    cfg.step_height,
                    12.0,
                    12.0,
                    "#FFFFFF",
                    &cfg.step_stroke,
                    DEFAULT_STROKE_WIDTH,
                ),
            );
            // Lines past the limit are dropped.
            for (line_idx, line) in wrap_text(&step.text, cfg.wrap_chars)
                .into_iter()
                .take(cfg.max_step_lines)
                .enumerate()
            {
                push(
                    &mut elements,
                    ElementRole::StepLabel,
                    label(
                        cx,
                        cy - 6.0 + cfg.line_pitch * line_idx as f32,
                        line,
                        TextAnchor::Middle,
                        14.0,
                        DEFAULT_TEXT_FILL,
                        400,
                    ),
                );
            }
            if let Some(out) = step.out.as_deref().filter(|out| !out.is_empty()) {
                push(
                    &mut elements,
                    ElementRole::StepOutput,
                    label(
                        cx,
                        cy + OUTPUT_LABEL_OFFSET,
                        format!("-> {out}"),
                        TextAnchor::Middle,
                        12.0,
                        DEFAULT_TEXT_FILL,
                        400,
                    ),
                );
            }
            if let Some(name) = placement.unresolved {
                push(
                    &mut elements,
                    ElementRole::UnresolvedLane,
                    label(
                        cx,
                        cy - half_step_h - 6.0,
                        format!("[{name}]"),
                        TextAnchor::Middle,
                        11.0,
                        UNRESOLVED_LANE_FILL,
                        600,
                    ),
                );
            }
            if let Some((px, py)) = previous {
                push(
                    &mut elements,
                    ElementRole::Connector,
                    directed_segment(
                        px + half_step_w,
                        py,
                        cx - half_step_w,
                        cy,
                        &cfg.arrow_color,
                        DEFAULT_STROKE_WIDTH,
                    ),
                );
            }
            previous = Some((cx, cy));
        }

        cursor += lanes.len() as f32 * lane_pitch + cfg.item_gap;
    }

    let height = spec.canvas.height_f32().max(cursor + cfg.bottom_margin);

    Layout {
        kind: DiagramKind::Flow,
        width,
        height,
        background: spec.canvas.theme.bg.clone(),
        elements,
    }
}
