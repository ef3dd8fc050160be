use bp_centiles::data_types::ViewSettings;
use bp_centiles::layout::{ViewConfig, ViewMode};
use bp_centiles::theme::ChartTheme;
use chrono::{TimeZone, Utc};

fn short_term(count: usize) -> ViewConfig {
    ViewConfig::resolve(
        &ViewSettings::short_term(),
        ViewMode::ShortTerm,
        count,
        &ChartTheme::default(),
    )
}

fn long_term(systolic: bool) -> ViewConfig {
    ViewConfig::resolve(
        &ViewSettings::long_term("holder_long_s"),
        ViewMode::LongTerm { systolic },
        3,
        &ChartTheme::default(),
    )
}

#[test]
fn test_short_term_width_grows_with_encounters() {
    let one = short_term(1);
    let three = short_term(3);
    assert_eq!(one.width, 250.0);
    assert_eq!(three.width, 390.0);
    assert_eq!(three.grid_cols, 9);
    assert_eq!(three.start_x, 90.0);
    assert_eq!(three.end_x, 230.0);
}

#[test]
fn test_short_term_zero_encounters() {
    let config = short_term(0);
    assert_eq!(config.width, 250.0);
    assert_eq!(config.grid_cols, 0);
    assert!(config.is_short_term());
}

#[test]
fn test_short_term_single_point_sits_in_the_middle() {
    let config = short_term(1);
    let mid = config.start_x + config.plot_width() / 2.0;
    assert_eq!(config.short_term_x(0, 1), mid);
}

#[test]
fn test_short_term_slots_are_evenly_spaced() {
    let config = short_term(3);
    let xs: Vec<f32> = (0..3).map(|i| config.short_term_x(i, 3)).collect();
    assert_eq!(xs, vec![90.0, 160.0, 230.0]);
    assert_eq!(xs[0], config.start_x);
    assert_eq!(xs[2], config.end_x);
}

#[test]
fn test_long_term_geometry() {
    let config = long_term(true);
    assert_eq!(config.width, 720.0);
    assert_eq!(config.start_x, 50.0);
    assert_eq!(config.end_x, 670.0);
    assert_eq!(config.grid_area(), (50.0, 20.0, 620.0, 200.0));
    assert_eq!(config.y_per_unit, 2.0);
    assert!(config.is_systolic());
    assert!(!long_term(false).is_systolic());
    assert_eq!(config.legend_anchor(), (667.0, 217.0));
}

#[test]
fn test_y_for_maps_zero_to_grid_bottom() {
    let config = long_term(false);
    assert_eq!(config.y_for(0.0), 220.0);
    assert_eq!(config.y_for(50.0), 120.0);
    assert_eq!(config.y_for(100.0), 20.0);

    let short = short_term(2);
    assert_eq!(short.y_for(0.0), 340.0);
    assert!((short.y_for(200.0) - 30.0).abs() < 1e-3);
}

#[test]
fn test_long_term_x_spans_the_time_range() {
    let config = long_term(true);
    let start = Utc.with_ymd_and_hms(2008, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(config.long_term_x(start, start, end), 50.0);
    assert_eq!(config.long_term_x(end, start, end), 670.0);

    let mid = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
    let x = config.long_term_x(mid, start, end);
    assert!(x > 50.0 && x < 670.0);
}

#[test]
fn test_single_encounter_long_term_is_centered() {
    let config = long_term(true);
    let t = Utc.with_ymd_and_hms(2010, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(config.long_term_x(t, t, t), 360.0);
}

#[test]
fn test_resolve_is_deterministic() {
    assert_eq!(short_term(4), short_term(4));
    assert_eq!(long_term(true), long_term(true));
}
