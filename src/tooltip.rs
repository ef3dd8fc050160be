//! Hover tooltip overlay.
//!
//! `Hidden` -> `Visible(anchor)` when the pointer enters a marker hit region,
//! back to `Hidden` when it leaves. Showing fades the frame in; hiding is
//! immediate and cancels any fade still running.

use crate::data_types::{Encounter, Sex};
use crate::plot::{HoverHandle, HoverId};
use crate::surface::TextAnchor;
use crate::theme::{ChartTheme, LabelStyle};
use crate::transition::{Animated, FADE_DURATION};
use crate::utils::date_formatter::format_age;
use gpui::*;
use std::time::Instant;

pub const TOOLTIP_WIDTH: f32 = 190.0;
pub const TOOLTIP_HEIGHT: f32 = 70.0;
/// Gap between the anchor point and the near edge of the frame.
pub const TOOLTIP_OFFSET: f32 = 10.0;

/// The four text fields of the tooltip, captured when the marker is drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
    pub heading: String,
    pub patient: String,
    pub pressure: String,
    pub other: String,
}

impl TooltipContent {
    pub fn from_encounter(encounter: &Encounter, sex: Sex) -> Self {
        Self {
            heading: format!("{} - {}", encounter.date, encounter.encounter_type),
            patient: format!(
                "{}, {} cm, {}",
                format_age(encounter.age),
                encounter.height,
                sex
            ),
            pressure: format!(
                "{}/{} mmHg ({}%/{}%)",
                encounter.systolic,
                encounter.diastolic,
                encounter.systolic_percentile,
                encounter.diastolic_percentile
            ),
            other: format!(
                "{}, {}, {}",
                encounter.site, encounter.position, encounter.method
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipState {
    Hidden,
    Visible { anchor: HoverId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupSide {
    Left,
    Right,
}

/// One text run of the tooltip, relative to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipText {
    pub origin: Point<Pixels>,
    pub text: String,
    pub style: LabelStyle,
    pub anchor: TextAnchor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    state: TooltipState,
    content: TooltipContent,
    side: PopupSide,
    frame: Bounds<Pixels>,
    opacity: Animated<f32>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new()
    }
}

impl Tooltip {
    pub fn new() -> Self {
        Self {
            state: TooltipState::Hidden,
            content: TooltipContent::default(),
            side: PopupSide::Right,
            frame: Bounds::default(),
            opacity: Animated::new(0.0),
        }
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TooltipState::Visible { .. })
    }

    pub fn content(&self) -> &TooltipContent {
        &self.content
    }

    pub fn side(&self) -> PopupSide {
        self.side
    }

    pub fn frame(&self) -> Bounds<Pixels> {
        self.frame
    }

    pub fn opacity(&self) -> f32 {
        *self.opacity.get()
    }

    pub fn is_animating(&self) -> bool {
        self.opacity.is_animating()
    }

    /// Right of the anchor unless the frame would run past the canvas edge.
    pub fn side_for(anchor_x: f32, canvas_width: f32) -> PopupSide {
        if anchor_x + TOOLTIP_OFFSET + TOOLTIP_WIDTH > canvas_width {
            PopupSide::Left
        } else {
            PopupSide::Right
        }
    }

    pub fn frame_for(anchor: Point<Pixels>, side: PopupSide) -> Bounds<Pixels> {
        let ax = f32::from(anchor.x);
        let ay = f32::from(anchor.y);
        let x = match side {
            PopupSide::Right => ax + TOOLTIP_OFFSET,
            PopupSide::Left => ax - TOOLTIP_OFFSET - TOOLTIP_WIDTH,
        };
        crate::surface::rect_bounds(x, ay - TOOLTIP_HEIGHT / 2.0, TOOLTIP_WIDTH, TOOLTIP_HEIGHT)
    }

    pub fn pointer_enter(&mut self, handle: &HoverHandle, canvas_width: f32, now: Instant) {
        self.content = handle.content.clone();
        self.side = Self::side_for(f32::from(handle.anchor.x), canvas_width);
        self.frame = Self::frame_for(handle.anchor, self.side);
        self.state = TooltipState::Visible { anchor: handle.id };
        self.opacity.snap(0.0);
        self.opacity.animate_to(1.0, FADE_DURATION, now);
    }

    pub fn pointer_leave(&mut self) {
        self.state = TooltipState::Hidden;
        self.opacity.snap(0.0);
    }

    /// Returns whether the fade is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.opacity.tick(now)
    }

    pub fn texts(&self, theme: &ChartTheme) -> Vec<TooltipText> {
        let origin = self.frame.origin;
        let at = |dx: f32, dy: f32| point(origin.x + px(dx), origin.y + px(dy));
        let item = |pos, text: &str, style, anchor| TooltipText {
            origin: pos,
            text: text.to_string(),
            style,
            anchor,
        };
        vec![
            item(at(10.0, 12.0), &self.content.heading, theme.tooltip_heading, TextAnchor::Start),
            item(at(55.0, 29.0), "Patient:", theme.tooltip_caption, TextAnchor::End),
            item(at(60.0, 29.0), &self.content.patient, theme.tooltip_text, TextAnchor::Start),
            item(at(55.0, 44.0), "BP:", theme.tooltip_caption, TextAnchor::End),
            item(at(60.0, 44.0), &self.content.pressure, theme.tooltip_text, TextAnchor::Start),
            item(at(55.0, 59.0), "Other:", theme.tooltip_caption, TextAnchor::End),
            item(at(60.0, 59.0), &self.content.other, theme.tooltip_text, TextAnchor::Start),
        ]
    }
}
