//! Layout resolver.
//!
//! Turns a [`ViewSettings`] preset and the size of the dataset into the concrete
//! geometry of one redraw. Resolution is a pure function of its inputs, so two
//! redraws with the same data land every primitive on the same pixel.

use crate::data_types::ViewSettings;
use crate::scales::ChartScale;
use crate::theme::ChartTheme;
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewMode {
    ShortTerm,
    LongTerm { systolic: bool },
}

/// Resolved geometry for one view instance. Built fresh on every redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    pub container_id: String,
    pub mode: ViewMode,
    pub width: f32,
    pub height: f32,
    pub left_gutter: f32,
    pub right_gutter: f32,
    pub top_gutter: f32,
    pub bottom_gutter: f32,
    pub left_padding: f32,
    pub right_padding: f32,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub v_labels: usize,
    pub max_value: f64,
    pub v_axis_label: Option<String>,
    pub dot_size: f32,
    pub dot_size_selected: f32,
    pub blanket_size: f32,
    pub show_dot_label: bool,
    pub min_label_dx: f32,
    pub even_spacing: bool,
    pub time_axis_divisions: usize,
    /// First and last x of the line graph area.
    pub start_x: f32,
    pub end_x: f32,
    /// Pixels per unit of the vertical axis.
    pub y_per_unit: f64,
    pub theme: ChartTheme,
}

impl ViewConfig {
    pub fn resolve(
        settings: &ViewSettings,
        mode: ViewMode,
        encounter_count: usize,
        theme: &ChartTheme,
    ) -> Self {
        let (width, grid_cols, start_x, end_x) = match mode {
            ViewMode::ShortTerm => {
                let dx = if encounter_count == 0 {
                    0.0
                } else {
                    (encounter_count - 1) as f32 * settings.slot_spacing
                };
                let width = dx
                    + settings.left_padding
                    + settings.right_padding
                    + settings.left_gutter
                    + settings.right_gutter;
                (
                    width,
                    encounter_count * 3,
                    settings.left_gutter + settings.left_padding,
                    width - settings.right_gutter - settings.right_padding,
                )
            }
            ViewMode::LongTerm { .. } => (
                settings.width,
                settings.grid_cols,
                settings.left_gutter,
                settings.width - settings.right_gutter,
            ),
        };

        let plot_height = settings.height - settings.bottom_gutter - settings.top_gutter;
        let y_per_unit = if settings.max_value > 0.0 {
            plot_height as f64 / settings.max_value
        } else {
            0.0
        };

        Self {
            container_id: settings.container_id.clone(),
            mode,
            width,
            height: settings.height,
            left_gutter: settings.left_gutter,
            right_gutter: settings.right_gutter,
            top_gutter: settings.top_gutter,
            bottom_gutter: settings.bottom_gutter,
            left_padding: settings.left_padding,
            right_padding: settings.right_padding,
            grid_rows: settings.grid_rows,
            grid_cols,
            v_labels: settings.v_labels,
            max_value: settings.max_value,
            v_axis_label: settings.v_axis_label.clone(),
            dot_size: settings.dot_size,
            dot_size_selected: settings.dot_size_selected,
            blanket_size: settings.blanket_size,
            show_dot_label: settings.show_dot_label,
            min_label_dx: settings.min_label_dx,
            even_spacing: settings.even_spacing,
            time_axis_divisions: settings.time_axis_divisions,
            start_x,
            end_x,
            y_per_unit,
            theme: theme.clone(),
        }
    }

    pub fn is_short_term(&self) -> bool {
        self.mode == ViewMode::ShortTerm
    }

    /// Long-term views only: whether this canvas shows the systolic series.
    pub fn is_systolic(&self) -> bool {
        matches!(self.mode, ViewMode::LongTerm { systolic: true })
    }

    /// Grid area (x, y, width, height): the canvas minus its gutters.
    pub fn grid_area(&self) -> (f32, f32, f32, f32) {
        (
            self.left_gutter,
            self.top_gutter,
            self.width - self.left_gutter - self.right_gutter,
            self.height - self.top_gutter - self.bottom_gutter,
        )
    }

    pub fn plot_width(&self) -> f32 {
        self.end_x - self.start_x
    }

    /// Short-term slot position of encounter `index` out of `count`.
    ///
    /// A single encounter sits in the middle of the plot width; otherwise the
    /// first and last encounters sit on the plot edges and the rest are spread
    /// evenly between them.
    pub fn short_term_x(&self, index: usize, count: usize) -> f32 {
        let dx = if count <= 1 {
            self.plot_width() / 2.0
        } else {
            index as f32 * self.plot_width() / (count - 1) as f32
        };
        self.left_gutter + self.left_padding + dx
    }

    /// Long-term position of `time` on the patient's `[start, end]` time range.
    pub fn long_term_x(
        &self,
        time: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> f32 {
        self.time_scale(start, end).map(time.timestamp_millis() as f64)
    }

    pub fn time_scale(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ChartScale {
        ChartScale::new_linear(
            (start.timestamp_millis() as f64, end.timestamp_millis() as f64),
            (self.start_x, self.end_x),
        )
    }

    /// Vertical pixel of `value` in vertical-axis units.
    pub fn y_for(&self, value: f64) -> f32 {
        (self.height as f64 - self.bottom_gutter as f64 - self.y_per_unit * value) as f32
    }

    /// Bottom-right corner the legend trigger hangs from.
    pub fn legend_anchor(&self) -> (f32, f32) {
        (
            self.width - self.right_gutter - 3.0,
            self.height - self.bottom_gutter - 3.0,
        )
    }
}
