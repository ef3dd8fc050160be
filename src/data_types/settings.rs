use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Geometry and behaviour presets for one view mode.
///
/// Everything here is in pixels except `max_value`, which is in the unit of the
/// vertical axis (mmHg for the short-term view, percentile for the long-term one).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Host container this view draws into.
    pub container_id: String,
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
    /// Side of the square hit region around each marker.
    pub blanket_size: f32,
    pub show_dot_label: bool,
    /// Horizontal distance between consecutive short-term slots.
    pub slot_spacing: f32,
    /// Minimum distance between two thinned date labels.
    pub min_label_dx: f32,
    /// Draw evenly spaced month labels instead of per-point dates.
    pub even_spacing: bool,
    pub time_axis_divisions: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::long_term("holder_long")
    }
}

impl ViewSettings {
    pub fn short_term() -> Self {
        Self {
            container_id: "holder_short".into(),
            width: 0.0,
            height: 400.0,
            left_gutter: 50.0,
            right_gutter: 20.0,
            top_gutter: 30.0,
            bottom_gutter: 60.0,
            left_padding: 40.0,
            right_padding: 140.0,
            grid_rows: 10,
            grid_cols: 0,
            v_labels: 10,
            max_value: 200.0,
            v_axis_label: Some("mmHg".into()),
            dot_size: 5.0,
            dot_size_selected: 8.0,
            blanket_size: 20.0,
            show_dot_label: true,
            slot_spacing: 70.0,
            min_label_dx: 30.0,
            even_spacing: false,
            time_axis_divisions: 5,
        }
    }

    pub fn long_term(container_id: &str) -> Self {
        Self {
            container_id: container_id.into(),
            width: 720.0,
            height: 300.0,
            left_gutter: 50.0,
            right_gutter: 50.0,
            top_gutter: 20.0,
            bottom_gutter: 80.0,
            left_padding: 0.0,
            right_padding: 0.0,
            grid_rows: 10,
            grid_cols: 12,
            v_labels: 10,
            max_value: 100.0,
            v_axis_label: Some("%".into()),
            dot_size: 4.0,
            dot_size_selected: 7.0,
            blanket_size: 16.0,
            show_dot_label: false,
            slot_spacing: 0.0,
            min_label_dx: 30.0,
            even_spacing: false,
            time_axis_divisions: 5,
        }
    }
}

/// Settings for the three chart slots plus the table container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub short_term: ViewSettings,
    pub long_term_systolic: ViewSettings,
    pub long_term_diastolic: ViewSettings,
    pub table_container_id: String,
    /// Number of most recent encounters shown in the short-term view.
    pub recent_count: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            short_term: ViewSettings::short_term(),
            long_term_systolic: ViewSettings::long_term("holder_long_s"),
            long_term_diastolic: ViewSettings::long_term("holder_long_d"),
            table_container_id: "holder_table".into(),
            recent_count: 3,
        }
    }
}

impl ChartSettings {
    /// Missing sections fall back to the built-in presets; missing fields inside a
    /// section fall back to the long-term preset.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse chart settings")
    }
}
