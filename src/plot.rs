//! Point and path rendering.
//!
//! Long-term canvases build both the systolic and the diastolic polyline on
//! every pass but only stroke (and mark) the series the canvas is for.
//! Short-term canvases draw one vertical connector and two markers per
//! encounter. Every marker gets a [`HoverHandle`] with an invisible hit region;
//! hover dispatch goes through the handle id instead of a per-marker closure.

use crate::axis_labels::LabelThinner;
use crate::data_types::{Encounter, Sex};
use crate::layout::ViewConfig;
use crate::surface::{rect_bounds, DrawingSurface, PathCommand, PrimitiveId, Role, TextAnchor};
use crate::theme::LabelStyle;
use crate::tooltip::TooltipContent;
use crate::zones::{ColorClass, ZoneDefinition};
use chrono::{DateTime, Utc};
use gpui::*;

pub type HoverId = usize;

/// Everything needed to react to a hover over one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverHandle {
    pub id: HoverId,
    pub anchor: Point<Pixels>,
    pub hit_region: Bounds<Pixels>,
    pub hit_primitive: PrimitiveId,
    pub marker: PrimitiveId,
    pub label: Option<PrimitiveId>,
    pub percentile: f64,
    pub color: ColorClass,
    pub radius: Pixels,
    pub radius_selected: Pixels,
    pub label_style: LabelStyle,
    pub label_style_hover: LabelStyle,
    pub content: TooltipContent,
}

impl HoverHandle {
    pub fn contains(&self, p: Point<Pixels>) -> bool {
        self.hit_region.contains(&p)
    }

    /// Enlarges the marker and emphasises its inline label.
    pub fn highlight(&self, surface: &mut DrawingSurface) {
        surface.set_radius(self.marker, self.radius_selected);
        if let Some(label) = self.label {
            surface.set_text_style(label, self.label_style_hover);
        }
    }

    pub fn restore(&self, surface: &mut DrawingSurface) {
        surface.set_radius(self.marker, self.radius);
        if let Some(label) = self.label {
            surface.set_text_style(label, self.label_style);
        }
    }
}

/// The two polylines of a long-term pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesPaths {
    pub systolic: Vec<PathCommand>,
    pub diastolic: Vec<PathCommand>,
}

impl SeriesPaths {
    pub fn advance(commands: &mut Vec<PathCommand>, p: Point<Pixels>) {
        if commands.is_empty() {
            commands.push(PathCommand::MoveTo(p));
        } else {
            commands.push(PathCommand::LineTo(p));
        }
    }
}

pub struct PlotRenderer<'a> {
    config: &'a ViewConfig,
    zones: &'a ZoneDefinition,
    sex: Sex,
}

impl<'a> PlotRenderer<'a> {
    pub fn new(config: &'a ViewConfig, zones: &'a ZoneDefinition, sex: Sex) -> Self {
        Self { config, zones, sex }
    }

    fn y(&self, value: f64) -> f32 {
        self.config.y_for(value).round()
    }

    /// Draws one marker plus its optional inline label and hit region.
    pub fn draw_marker(
        &self,
        surface: &mut DrawingSurface,
        handles: &mut Vec<HoverHandle>,
        x: f32,
        y: f32,
        percentile: f64,
        encounter: &Encounter,
    ) -> HoverId {
        let theme = &self.config.theme;
        let color = self.zones.color_for(percentile);
        let center = point(px(x), px(y));
        let radius = px(self.config.dot_size);

        let marker = surface.circle(
            Role::Marker,
            center,
            radius,
            color.marker_fill(),
            color.marker_stroke(),
            theme.marker_stroke_width,
        );

        let label = self.config.show_dot_label.then(|| {
            surface.text(
                Role::MarkerLabel,
                center,
                format!("{}%", percentile),
                theme.axis_label,
                TextAnchor::Middle,
            )
        });

        let size = self.config.blanket_size;
        let hit_region = rect_bounds(x - size / 2.0, y - size / 2.0, size, size);
        let hit_primitive = surface.rect(Role::HitRegion, hit_region, gpui::white(), 0.0);

        let id = handles.len();
        handles.push(HoverHandle {
            id,
            anchor: center,
            hit_region,
            hit_primitive,
            marker,
            label,
            percentile,
            color,
            radius,
            radius_selected: px(self.config.dot_size_selected),
            label_style: theme.axis_label,
            label_style_hover: theme.marker_label_hover,
            content: TooltipContent::from_encounter(encounter, self.sex),
        });
        id
    }

    /// Long-term pass over `encounters` in chronological order.
    ///
    /// Returns both polylines; only the series selected by the canvas mode is
    /// stroked, and nothing is stroked when there are no encounters.
    pub fn render_long_term(
        &self,
        surface: &mut DrawingSurface,
        handles: &mut Vec<HoverHandle>,
        encounters: &[Encounter],
        time_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> SeriesPaths {
        let mut paths = SeriesPaths::default();
        let Some((start, end)) = time_range else {
            return paths;
        };
        let systolic = self.config.is_systolic();
        let theme = &self.config.theme;
        let scale = self.config.time_scale(start, end);
        let mut thinner = LabelThinner::new(self.config.min_label_dx);
        let label_y = self.config.height - 70.0;

        for encounter in encounters {
            let x = scale.map(encounter.timestamp.timestamp_millis() as f64).round();

            let ys = self.y(encounter.systolic_percentile);
            let yd = self.y(encounter.diastolic_percentile);
            SeriesPaths::advance(&mut paths.systolic, point(px(x), px(ys)));
            SeriesPaths::advance(&mut paths.diastolic, point(px(x), px(yd)));

            let (y, percentile) = if systolic {
                (ys, encounter.systolic_percentile)
            } else {
                (yd, encounter.diastolic_percentile)
            };
            self.draw_marker(surface, handles, x, y, percentile, encounter);

            // Per-point dates go under the diastolic chart only.
            if !self.config.even_spacing && !systolic && thinner.accept(x) {
                let id = surface.text(
                    Role::DateLabel,
                    point(px(x + 15.0), px(label_y + 40.0)),
                    encounter.date.clone(),
                    theme.axis_label,
                    TextAnchor::Middle,
                );
                surface.set_rotation(id, 60.0);
                surface.to_back(id);
            }
        }

        let (commands, stroke) = if systolic {
            (&paths.systolic, theme.systolic_line)
        } else {
            (&paths.diastolic, theme.diastolic_line)
        };
        if !commands.is_empty() {
            surface.path(Role::SeriesPath, commands.clone(), stroke, theme.series_line_width);
        }
        paths
    }

    /// Short-term pass: evenly spaced slots, raw mmHg values on the vertical axis.
    pub fn render_short_term(
        &self,
        surface: &mut DrawingSurface,
        handles: &mut Vec<HoverHandle>,
        encounters: &[Encounter],
    ) {
        let theme = &self.config.theme;
        let count = encounters.len();
        for (i, encounter) in encounters.iter().enumerate() {
            let x = self.config.short_term_x(i, count).round();
            let y1 = self.y(encounter.diastolic);
            let y2 = self.y(encounter.systolic);

            surface.line(
                Role::Connector,
                point(px(x), px(y1)),
                point(px(x), px(y2)),
                theme.systolic_line,
                theme.series_line_width,
            );

            self.draw_marker(surface, handles, x, y1, encounter.diastolic_percentile, encounter);
            self.draw_marker(surface, handles, x, y2, encounter.systolic_percentile, encounter);

            let id = surface.text(
                Role::DateLabel,
                point(px(x), px(self.config.height - 50.0)),
                encounter.date.clone(),
                theme.axis_label,
                TextAnchor::Middle,
            );
            surface.to_back(id);
        }
    }
}
