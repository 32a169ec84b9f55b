use std::collections::HashSet;

use log::debug;

use super::*;

const TITLE_X: f32 = 32.0;
const TITLE_Y: f32 = 36.0;
const HEADER_X: f32 = 28.0;
const HEADER_Y: f32 = 48.0;
const SCOPE_X: f32 = 40.0;
const SCOPE_Y: f32 = 90.0;
const SECTION_Y: f32 = 140.0;
const FIRST_CARD_Y: f32 = 160.0;

pub(super) fn compute_ia_layout(spec: &Spec, config: &LayoutConfig) -> Layout {
    let cfg = &config.ia;
    let width = spec.canvas.width_f32();
    let height = spec.canvas.height_f32();
    let background = spec.canvas.theme.bg.clone();
    let ia = &spec.ia;
    let mut elements = Vec::new();

    push(
        &mut elements,
        ElementRole::Background,
        rect(0.0, 0.0, width, height, 0.0, 0.0, &background, "none", 0.0),
    );
    push(
        &mut elements,
        ElementRole::Title,
        label(TITLE_X, TITLE_Y, spec.project.title.as_str(), TextAnchor::Start, 24.0, DEFAULT_TEXT_FILL, 600),
    );
    push(
        &mut elements,
        ElementRole::Header,
        rect(
            HEADER_X,
            HEADER_Y,
            width - 2.0 * HEADER_X,
            cfg.header_height,
            10.0,
            10.0,
            "#FFFFFF",
            &cfg.header_stroke,
            DEFAULT_STROKE_WIDTH,
        ),
    );
    let scope = format!("Scope: {}", ia.scope.join(&cfg.scope_separator));
    push(
        &mut elements,
        ElementRole::Heading,
        label(SCOPE_X, SCOPE_Y, scope, TextAnchor::Start, 14.0, DEFAULT_TEXT_FILL, 400),
    );
    push(
        &mut elements,
        ElementRole::Heading,
        label(TITLE_X, SECTION_Y, "Screen Zoning", TextAnchor::Start, 18.0, DEFAULT_TEXT_FILL, 600),
    );

    // Input order is paint order: later zones cover earlier ones.
    for zone in &ia.zones {
        let fill = zone.fill.as_deref().unwrap_or(&cfg.zone_fill);
        push(
            &mut elements,
            ElementRole::Zone,
            rect(zone.x, zone.y, zone.w, zone.h, 12.0, 12.0, fill, &cfg.zone_stroke, DEFAULT_STROKE_WIDTH),
        );
        push(
            &mut elements,
            ElementRole::ZoneLabel,
            label(
                zone.x + 10.0,
                zone.y + 26.0,
                format!("{} - {}", zone.id, zone.label),
                TextAnchor::Start,
                14.0,
                DEFAULT_TEXT_FILL,
                600,
            ),
        );
    }

    let known_zones: HashSet<&str> = ia.zones.iter().map(|zone| zone.id.as_str()).collect();
    let column_x = width - cfg.component_column_width;
    push(
        &mut elements,
        ElementRole::Heading,
        label(column_x, SECTION_Y, "Components (by Zone)", TextAnchor::Start, 18.0, DEFAULT_TEXT_FILL, 600),
    );
    let mut cursor = FIRST_CARD_Y;
    for component in &ia.components {
        if !known_zones.contains(component.zone.as_str()) {
            debug!(component = component.id.as_str(), zone = component.zone.as_str(); "component references unknown zone");
        }
        push(
            &mut elements,
            ElementRole::ComponentCard,
            rect(
                column_x - 20.0,
                cursor - cfg.component_card_height / 2.0,
                cfg.component_card_width,
                cfg.component_card_height,
                10.0,
                10.0,
                "#FFFFFF",
                &cfg.component_stroke,
                DEFAULT_STROKE_WIDTH,
            ),
        );
        push(
            &mut elements,
            ElementRole::ComponentLabel,
            label(
                column_x - 10.0,
                cursor + 4.0,
                format!("[{}] {}", component.zone, component.title),
                TextAnchor::Start,
                13.0,
                DEFAULT_TEXT_FILL,
                400,
            ),
        );
        cursor += cfg.component_row_height;
    }

    Layout {
        kind: DiagramKind::Ia,
        width,
        height,
        background,
        elements,
    }
}
