//! Axis label generation: vertical value labels, thinned per-point date labels
//! and evenly spaced month labels for the time axis.

use crate::utils::date_formatter::format_month_year;
use chrono::{DateTime, TimeZone, Utc};

/// Default minimum horizontal distance between two emitted date labels.
pub const MIN_LABEL_DX: f32 = 30.0;

#[derive(Clone, Debug, PartialEq)]
pub struct VerticalLabel {
    pub y: f32,
    pub value: f64,
    pub text: String,
}

/// Evenly spaced labels from `max_value` at `top` down to 0 at `top + height`.
///
/// With `all` set the `rows + 1` labels include both ends; otherwise only the
/// `rows - 1` interior labels are produced (the compact short-term variant).
pub fn vertical_labels(
    top: f32,
    height: f32,
    rows: usize,
    max_value: f64,
    all: bool,
) -> Vec<VerticalLabel> {
    if rows == 0 {
        return Vec::new();
    }
    let step_delta = height / rows as f32;
    let step_value = max_value / rows as f64;
    let indices = if all { 0..=rows } else { 1..=rows - 1 };
    indices
        .map(|i| {
            let value = max_value - i as f64 * step_value;
            VerticalLabel {
                y: (top + i as f32 * step_delta).round(),
                value,
                text: format_axis_value(value),
            }
        })
        .collect()
}

/// Vertical offset of the axis title above the topmost label position.
pub fn axis_title_offset(all: bool) -> f32 {
    if all {
        20.0
    } else {
        10.0
    }
}

pub fn format_axis_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Suppresses labels that would land too close to the previously emitted one.
///
/// Positions must be fed left to right; only emitted positions move the cursor.
#[derive(Clone, Debug)]
pub struct LabelThinner {
    min_dx: f32,
    last_x: Option<f32>,
}

impl LabelThinner {
    pub fn new(min_dx: f32) -> Self {
        Self { min_dx, last_x: None }
    }

    /// Returns whether a label at `x` should be emitted, recording it if so.
    pub fn accept(&mut self, x: f32) -> bool {
        let emit = match self.last_x {
            None => true,
            Some(last) => x - last >= self.min_dx,
        };
        if emit {
            self.last_x = Some(x);
        }
        emit
    }
}

/// Indices of the positions that survive thinning.
pub fn thin_positions(xs: &[f32], min_dx: f32) -> Vec<usize> {
    let mut thinner = LabelThinner::new(min_dx);
    xs.iter()
        .enumerate()
        .filter(|(_, x)| thinner.accept(**x))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeLabel {
    pub x: f32,
    pub text: String,
}

/// `divisions + 1` month labels spread evenly over `[x, x + width]` between
/// `start` and `end`.
pub fn time_axis_labels(
    x: f32,
    width: f32,
    divisions: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<TimeLabel> {
    if divisions == 0 {
        return Vec::new();
    }
    let step_delta = width / divisions as f32;
    let start_ms = start.timestamp_millis();
    let step_ms = (end.timestamp_millis() - start_ms) as f64 / divisions as f64;
    (0..=divisions)
        .filter_map(|i| {
            let t = start_ms + (i as f64 * step_ms).round() as i64;
            let time = Utc.timestamp_millis_opt(t).single()?;
            Some(TimeLabel {
                x: (x + i as f32 * step_delta).round(),
                text: format_month_year(time),
            })
        })
        .collect()
}
