// Static chart layers: grid, zone bands, axis labels and titles.

use crate::axis_labels::{axis_title_offset, time_axis_labels, vertical_labels};
use crate::layout::ViewConfig;
use crate::surface::{rect_bounds, DrawingSurface, PathCommand, PrimitiveId, Role, TextAnchor};
use crate::theme::LabelStyle;
use crate::zones::{zone_band_rects, ZoneDefinition};
use chrono::{DateTime, Utc};
use gpui::*;

fn snap(v: f32) -> Pixels {
    px(v.round() + 0.5)
}

/// Grid frame plus `rows - 1` horizontal and `cols - 1` vertical interior lines,
/// snapped to half pixels.
pub fn paint_grid(
    surface: &mut DrawingSurface,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    cols: usize,
    rows: usize,
    color: Hsla,
) -> PrimitiveId {
    let mut commands = vec![
        PathCommand::MoveTo(point(snap(x), snap(y))),
        PathCommand::LineTo(point(snap(x + w), snap(y))),
        PathCommand::LineTo(point(snap(x + w), snap(y + h))),
        PathCommand::LineTo(point(snap(x), snap(y + h))),
        PathCommand::LineTo(point(snap(x), snap(y))),
    ];

    if rows > 0 {
        let row_height = h / rows as f32;
        for i in 1..rows {
            let row_y = snap(y + i as f32 * row_height);
            commands.push(PathCommand::MoveTo(point(snap(x), row_y)));
            commands.push(PathCommand::LineTo(point(snap(x + w), row_y)));
        }
    }
    if cols > 0 {
        let column_width = w / cols as f32;
        for i in 1..cols {
            let col_x = snap(x + i as f32 * column_width);
            commands.push(PathCommand::MoveTo(point(col_x, snap(y))));
            commands.push(PathCommand::LineTo(point(col_x, snap(y + h))));
        }
    }

    surface.path(Role::Grid, commands, color, px(1.0))
}

/// Zone band backdrop, pushed behind everything already on the surface.
pub fn paint_zones(
    surface: &mut DrawingSurface,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    zones: &ZoneDefinition,
) -> Vec<PrimitiveId> {
    let rects = zone_band_rects(zones, x + 0.5, y + 0.5, w, h);
    // Reversed so the first band ends up first in paint order after the to_back moves.
    rects
        .iter()
        .rev()
        .map(|band| {
            let id = surface.rect(
                Role::ZoneBand,
                rect_bounds(band.x, band.y, band.width, band.height),
                band.fill,
                band.opacity,
            );
            surface.to_back(id);
            id
        })
        .collect()
}

/// Vertical axis labels right-aligned at `x`, plus the optional axis title.
pub fn paint_v_axis_labels(
    surface: &mut DrawingSurface,
    x: f32,
    y: f32,
    h: f32,
    rows: usize,
    max_value: f64,
    axis_label: Option<&str>,
    style: LabelStyle,
    all: bool,
) {
    for label in vertical_labels(y, h, rows, max_value, all) {
        let id = surface.text(
            Role::AxisLabel,
            point(px(x), px(label.y)),
            label.text,
            style,
            TextAnchor::Middle,
        );
        surface.to_back(id);
    }
    if let Some(title) = axis_label {
        let id = surface.text(
            Role::AxisTitle,
            point(px(x), px((y - axis_title_offset(all)).round())),
            title,
            style,
            TextAnchor::Middle,
        );
        surface.to_back(id);
    }
}

/// Month labels spread evenly along the time axis, rotated like the per-point dates.
pub fn paint_h_axis_labels(
    surface: &mut DrawingSurface,
    x: f32,
    y: f32,
    w: f32,
    divisions: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    style: LabelStyle,
) {
    for label in time_axis_labels(x, w, divisions, start, end) {
        let id = surface.text(
            Role::DateLabel,
            point(px(label.x + 10.0), px(y - 5.0 + 40.0)),
            label.text,
            style,
            TextAnchor::Middle,
        );
        surface.set_rotation(id, 60.0);
        surface.to_back(id);
    }
}

/// "Systolic" / "Diastolic" title right of a long-term plot.
pub fn paint_series_title(surface: &mut DrawingSurface, config: &ViewConfig) -> PrimitiveId {
    let title = if config.is_systolic() {
        "Systolic"
    } else {
        "Diastolic"
    };
    let (_, y, _, h) = config.grid_area();
    let id = surface.text(
        Role::SeriesTitle,
        point(
            px(config.width - config.right_gutter + 20.0),
            px((y + h / 2.0).round()),
        ),
        title,
        config.theme.series_title,
        TextAnchor::Middle,
    );
    surface.set_rotation(id, 90.0);
    id
}
