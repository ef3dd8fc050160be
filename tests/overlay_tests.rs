use bp_centiles::data_types::{ChartSettings, Encounter, Patient, Sex};
use bp_centiles::legend::{LegendOverlay, SWATCH_RADIUS};
use bp_centiles::surface::Shape;
use bp_centiles::theme::ChartTheme;
use bp_centiles::tooltip::{PopupSide, Tooltip, TooltipState};
use bp_centiles::view_registry::{
    CanvasContext, HitTarget, ViewOrchestrator, ViewRegistry, ViewSlot,
};
use bp_centiles::zones::{ColorClass, Zone, ZoneDefinition};
use chrono::{TimeZone, Utc};
use gpui::{point, px, Pixels};
use std::time::{Duration, Instant};

fn encounter(year: i32, age: f64) -> Encounter {
    Encounter {
        timestamp: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        age,
        height: 130.0,
        systolic: 104.0,
        diastolic: 64.0,
        systolic_percentile: 70.0,
        diastolic_percentile: 45.0,
        site: "Right arm".into(),
        position: "Sitting".into(),
        method: "Auscultation".into(),
        date: format!("01/01/{}", year),
        encounter_type: "Office visit".into(),
    }
}

fn short_term_registry() -> ViewRegistry {
    let patient = Patient::new(
        Sex::Female,
        vec![encounter(2010, 3.0), encounter(2011, 4.0), encounter(2012, 5.5)],
    );
    let orchestrator = ViewOrchestrator::new(ChartSettings::default(), ChartTheme::default());
    let mut registry = ViewRegistry::new();
    let mut table = |_: &str, _: &[Encounter]| {};
    orchestrator.draw_views(
        &mut registry,
        &|_: &str| true,
        &mut table,
        &patient,
        &patient,
        &ZoneDefinition::pediatric_default(),
    );
    registry
}

fn marker_radius(canvas: &CanvasContext, id: usize) -> Pixels {
    let handle = &canvas.hover_handles()[id];
    match &canvas.surface.get(handle.marker).unwrap().shape {
        Shape::Circle { radius, .. } => *radius,
        other => panic!("marker is not a circle: {:?}", other),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_hover_shows_tooltip_and_highlights_marker() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let anchor = canvas.hover_handles()[0].anchor;
    let now = Instant::now();

    assert!(canvas.pointer_move(anchor, now));
    assert_eq!(canvas.hovered(), Some(HitTarget::Marker(0)));
    assert_eq!(canvas.tooltip().state(), TooltipState::Visible { anchor: 0 });
    assert_eq!(canvas.tooltip().side(), PopupSide::Right);
    assert_eq!(canvas.tooltip().frame().origin.x, px(100.0));
    assert_eq!(marker_radius(canvas, 0), px(8.0));

    // Moving inside the same hit region changes nothing.
    assert!(!canvas.pointer_move(anchor + point(px(2.0), px(2.0)), now));

    let content = canvas.tooltip().content();
    assert_eq!(content.heading, "01/01/2010 - Office visit");
    assert_eq!(content.patient, "3y 0m, 130 cm, female");
    assert_eq!(content.pressure, "104/64 mmHg (70%/45%)");
    assert_eq!(content.other, "Right arm, Sitting, Auscultation");
}

#[test]
fn test_tooltip_flips_left_near_the_right_edge() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let anchor = canvas.hover_handles()[5].anchor;
    assert_eq!(anchor.x, px(230.0));

    canvas.pointer_move(anchor, Instant::now());
    assert_eq!(canvas.tooltip().side(), PopupSide::Left);
    assert_eq!(canvas.tooltip().frame().origin.x, px(30.0));
    assert_eq!(canvas.tooltip().content().patient, "5y 6m, 130 cm, female");
}

#[test]
fn test_leave_hides_immediately_and_restores_marker() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let anchor = canvas.hover_handles()[1].anchor;
    let now = Instant::now();

    canvas.pointer_move(anchor, now);
    canvas.tick(now + ms(100));
    assert!(canvas.tooltip().opacity() > 0.0);

    assert!(canvas.pointer_move(point(px(1.0), px(1.0)), now + ms(100)));
    assert_eq!(canvas.hovered(), None);
    assert_eq!(canvas.tooltip().state(), TooltipState::Hidden);
    assert_eq!(canvas.tooltip().opacity(), 0.0);
    assert!(!canvas.tooltip().is_animating());
    assert_eq!(marker_radius(canvas, 1), px(5.0));
}

#[test]
fn test_tooltip_fades_in() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let anchor = canvas.hover_handles()[2].anchor;
    let t0 = Instant::now();

    canvas.pointer_move(anchor, t0);
    assert_eq!(canvas.tooltip().opacity(), 0.0);
    assert!(canvas.is_animating());

    assert!(canvas.tick(t0 + ms(100)));
    assert!((canvas.tooltip().opacity() - 0.5).abs() < 1e-3);

    assert!(!canvas.tick(t0 + ms(250)));
    assert_eq!(canvas.tooltip().opacity(), 1.0);
    assert!(!canvas.is_animating());
}

#[test]
fn test_moving_between_markers_restarts_the_fade() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let a = canvas.hover_handles()[0].anchor;
    let b = canvas.hover_handles()[2].anchor;
    let t0 = Instant::now();

    canvas.pointer_move(a, t0);
    canvas.tick(t0 + ms(100));
    assert!(canvas.pointer_move(b, t0 + ms(100)));

    assert_eq!(canvas.hovered(), Some(HitTarget::Marker(2)));
    assert_eq!(canvas.tooltip().state(), TooltipState::Visible { anchor: 2 });
    assert_eq!(canvas.tooltip().opacity(), 0.0);
    assert_eq!(marker_radius(canvas, 0), px(5.0));
    assert_eq!(marker_radius(canvas, 2), px(8.0));

    canvas.tick(t0 + ms(150));
    assert!((canvas.tooltip().opacity() - 0.25).abs() < 1e-3);
}

#[test]
fn test_legend_expands_and_collapses() {
    let mut registry = short_term_registry();
    let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
    let legend = canvas.legend().unwrap().clone();
    let collapsed = legend.collapsed_bounds();
    let expanded = legend.expanded_bounds();
    assert_eq!(collapsed.size.width, px(20.0));
    assert_eq!(expanded.size.width, px(160.0));
    assert_eq!(expanded.size.height, px(150.0));
    assert_eq!(legend.entries().len(), 4);

    let t0 = Instant::now();
    let trigger = collapsed.center();
    assert!(canvas.pointer_move(trigger, t0));
    assert_eq!(canvas.hovered(), Some(HitTarget::Legend));
    assert!(canvas.legend().unwrap().is_expanded());
    // The whole expanded frame keeps the legend open.
    assert!(canvas.legend().unwrap().contains(expanded.origin + point(px(5.0), px(5.0))));

    canvas.tick(t0 + ms(100));
    let legend = canvas.legend().unwrap();
    assert_eq!(legend.frame().size.width, px(90.0));
    assert!((legend.content_opacity() - 0.5).abs() < 1e-3);
    assert!((legend.glyph_opacity() - 0.5).abs() < 1e-3);

    // Leaving half way reverses from the current size.
    assert!(canvas.pointer_move(point(px(1.0), px(1.0)), t0 + ms(100)));
    assert!(!canvas.legend().unwrap().is_expanded());
    canvas.tick(t0 + ms(200));
    assert_eq!(canvas.legend().unwrap().frame().size.width, px(55.0));

    assert!(!canvas.tick(t0 + ms(400)));
    let legend = canvas.legend().unwrap();
    assert_eq!(legend.frame(), collapsed);
    assert_eq!(legend.content_opacity(), 0.0);
    assert_eq!(legend.glyph_opacity(), 1.0);
}

#[test]
fn test_redraw_resets_overlays() {
    let mut registry = short_term_registry();
    {
        let canvas = registry.canvas_mut(ViewSlot::ShortTerm).unwrap();
        let anchor = canvas.hover_handles()[0].anchor;
        canvas.pointer_move(anchor, Instant::now());
        assert!(canvas.tooltip().is_visible());
    }

    registry.clear(ViewSlot::ShortTerm);
    let canvas = registry.canvas(ViewSlot::ShortTerm).unwrap();
    assert!(!canvas.tooltip().is_visible());
    assert_eq!(canvas.hovered(), None);
}

#[test]
fn test_tooltip_side_rule() {
    assert_eq!(Tooltip::side_for(100.0, 390.0), PopupSide::Right);
    assert_eq!(Tooltip::side_for(190.0, 390.0), PopupSide::Right);
    assert_eq!(Tooltip::side_for(191.0, 390.0), PopupSide::Left);
    assert_eq!(Tooltip::side_for(200.0, 390.0), PopupSide::Left);
}

#[test]
fn test_right_side_frame_stays_on_canvas() {
    for anchor_x in [150.0_f32, 185.0, 190.0, 195.0, 200.0, 230.0] {
        let anchor = point(px(anchor_x), px(100.0));
        let frame = Tooltip::frame_for(anchor, Tooltip::side_for(anchor_x, 390.0));
        let right = f32::from(frame.origin.x + frame.size.width);
        assert!(right <= 390.0, "frame for x={} ends at {}", anchor_x, right);
    }
}

#[test]
fn test_legend_rows_ascend_bottom_to_top() {
    let zones = ZoneDefinition::pediatric_default();
    let legend = LegendOverlay::new(667.0, 217.0, &zones);
    let entries = legend.entries();
    assert_eq!(entries.len(), 4);

    // Highest band on top, lowest band on the bottom row.
    assert_eq!(entries[0].label, "Hypertension (>95%)");
    assert_eq!(entries[0].swatch_center.y, px(101.0));
    assert_eq!(entries[3].label, "Normal (<50%)");
    assert_eq!(entries[3].swatch_center.y, px(173.0));

    let lowest = entries
        .iter()
        .map(|e| f32::from(e.swatch_center.y))
        .fold(f32::MIN, f32::max);
    assert_eq!(lowest, f32::from(entries[3].swatch_center.y));
}

#[test]
fn test_legend_rows_fit_the_expanded_frame() {
    let zones = ZoneDefinition::new(
        (0..8)
            .map(|i| {
                let color = ColorClass::new(format!("band{}", i), i as f32 / 8.0);
                Zone::new(12.5, color, 0.2, format!("Band {}", i))
            })
            .collect(),
    );
    let legend = LegendOverlay::new(667.0, 217.0, &zones);
    let frame = legend.expanded_bounds();
    let bottom = frame.origin.y + frame.size.height;
    for entry in legend.entries() {
        assert!(entry.swatch_center.y + px(SWATCH_RADIUS) <= bottom);
        assert!(entry.swatch_center.y > frame.origin.y + px(15.0));
    }
    assert!(legend.entries().windows(2).all(|w| w[0].swatch_center.y < w[1].swatch_center.y));
}
