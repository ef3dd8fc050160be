use gpui::*;

/// Font settings for one kind of text primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub size: Pixels,
    pub color: Hsla,
    pub bold: bool,
    pub italic: bool,
}

impl LabelStyle {
    pub fn new(size: f32, color: Hsla) -> Self {
        Self {
            size: px(size),
            color,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Converts a hue/saturation/brightness triple (all in `0..=1`) to gpui's HSL colour.
pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Hsla {
    let l = brightness * (1.0 - saturation / 2.0);
    let s = if l <= 0.0 || l >= 1.0 {
        0.0
    } else {
        (brightness - l) / l.min(1.0 - l)
    };
    hsla(hue, s, l, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Hsla,
    pub grid_line: Hsla,
    pub systolic_line: Hsla,
    pub diastolic_line: Hsla,
    pub series_line_width: Pixels,
    pub marker_stroke_width: Pixels,
    /// Axis labels, date labels and idle marker labels.
    pub axis_label: LabelStyle,
    /// Marker labels while their marker is hovered.
    pub marker_label_hover: LabelStyle,
    pub series_title: LabelStyle,
    pub tooltip_heading: LabelStyle,
    pub tooltip_text: LabelStyle,
    pub tooltip_caption: LabelStyle,
    pub tooltip_background: Hsla,
    pub tooltip_border: Hsla,
    pub legend_background: Hsla,
    pub legend_border: Hsla,
    pub legend_title: LabelStyle,
    pub legend_text: LabelStyle,
    pub legend_glyph: LabelStyle,
}

impl Default for ChartTheme {
    fn default() -> Self {
        let grey: Hsla = rgb(0x555555).into();
        Self {
            background: gpui::white(),
            grid_line: rgb(0xcccccc).into(),
            systolic_line: rgb(0x3366cc).into(),
            diastolic_line: rgb(0x66aa33).into(),
            series_line_width: px(3.0),
            marker_stroke_width: px(2.0),
            axis_label: LabelStyle::new(10.0, grey),
            marker_label_hover: LabelStyle::new(12.0, gpui::black()).bold(),
            series_title: LabelStyle::new(20.0, grey),
            tooltip_heading: LabelStyle::new(12.0, gpui::white()).bold(),
            tooltip_text: LabelStyle::new(12.0, gpui::white()),
            tooltip_caption: LabelStyle::new(12.0, rgb(0x999999).into()),
            tooltip_background: gpui::black().opacity(0.8),
            tooltip_border: rgb(0x666666).into(),
            legend_background: gpui::black().opacity(0.8),
            legend_border: rgb(0x444444).into(),
            legend_title: LabelStyle::new(12.0, grey),
            legend_text: LabelStyle::new(10.0, gpui::white()),
            legend_glyph: LabelStyle::new(14.0, grey).bold().italic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    #[test]
    fn full_brightness_without_saturation_is_white() {
        let c = hsb(0.3, 0.0, 1.0);
        assert_eq!(c.l, 1.0);
        assert_eq!(c.s, 0.0);
    }

    #[test]
    fn zero_brightness_is_black() {
        let c = hsb(0.7, 0.5, 0.0);
        assert_eq!(c.l, 0.0);
    }
}
