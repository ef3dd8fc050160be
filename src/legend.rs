//! Collapsible zone legend.
//!
//! A small "i" trigger sits in the bottom-right corner of the plot. Hovering it
//! grows the frame into the full legend and fades the entries in; leaving runs
//! the mirror animation. Each hover change retargets the running animations.

use crate::surface::rect_bounds;
use crate::transition::{Animated, FADE_DURATION};
use crate::zones::ZoneDefinition;
use gpui::*;
use std::time::Instant;

pub const COLLAPSED_SIZE: f32 = 20.0;
pub const EXPANDED_WIDTH: f32 = 160.0;
pub const EXPANDED_HEIGHT: f32 = 150.0;
pub const ROW_HEIGHT: f32 = 24.0;
pub const SWATCH_RADIUS: f32 = 6.0;
/// Vertical room below the title for the band rows.
const MAX_ROWS_HEIGHT: f32 = EXPANDED_HEIGHT - 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub swatch_center: Point<Pixels>,
    pub fill: Hsla,
    pub stroke: Hsla,
    pub label_origin: Point<Pixels>,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendOverlay {
    anchor: Point<Pixels>,
    entries: Vec<LegendEntry>,
    expanded: bool,
    frame: Animated<Bounds<Pixels>>,
    content_opacity: Animated<f32>,
    glyph_opacity: Animated<f32>,
}

impl LegendOverlay {
    /// `anchor` is the bottom-right corner both frame states hang from.
    pub fn new(anchor_x: f32, anchor_y: f32, zones: &ZoneDefinition) -> Self {
        let left = anchor_x - EXPANDED_WIDTH;
        let top = anchor_y - EXPANDED_HEIGHT;
        // Rows shrink when the bands would not fit under the title.
        let step = ROW_HEIGHT.min(MAX_ROWS_HEIGHT / zones.len().max(1) as f32);
        // Highest band on the top row, so percentiles ascend bottom to top.
        let entries = zones
            .zones
            .iter()
            .enumerate()
            .map(|(i, zone)| {
                let row = (i + 1) as f32;
                let y = top + row * step + 10.0;
                LegendEntry {
                    swatch_center: point(px(left + 20.0), px(y)),
                    fill: zone.color.marker_fill(),
                    stroke: zone.color.marker_stroke(),
                    label_origin: point(px(left + 36.0), px(y)),
                    label: zone.label.clone(),
                }
            })
            .collect();

        Self {
            anchor: point(px(anchor_x), px(anchor_y)),
            entries,
            expanded: false,
            frame: Animated::new(Self::collapsed_bounds_at(anchor_x, anchor_y)),
            content_opacity: Animated::new(0.0),
            glyph_opacity: Animated::new(1.0),
        }
    }

    fn collapsed_bounds_at(x: f32, y: f32) -> Bounds<Pixels> {
        rect_bounds(x - COLLAPSED_SIZE, y - COLLAPSED_SIZE, COLLAPSED_SIZE, COLLAPSED_SIZE)
    }

    fn expanded_bounds_at(x: f32, y: f32) -> Bounds<Pixels> {
        rect_bounds(x - EXPANDED_WIDTH, y - EXPANDED_HEIGHT, EXPANDED_WIDTH, EXPANDED_HEIGHT)
    }

    fn anchor_f32(&self) -> (f32, f32) {
        (f32::from(self.anchor.x), f32::from(self.anchor.y))
    }

    pub fn collapsed_bounds(&self) -> Bounds<Pixels> {
        let (x, y) = self.anchor_f32();
        Self::collapsed_bounds_at(x, y)
    }

    pub fn expanded_bounds(&self) -> Bounds<Pixels> {
        let (x, y) = self.anchor_f32();
        Self::expanded_bounds_at(x, y)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn frame(&self) -> Bounds<Pixels> {
        *self.frame.get()
    }

    pub fn content_opacity(&self) -> f32 {
        *self.content_opacity.get()
    }

    pub fn glyph_opacity(&self) -> f32 {
        *self.glyph_opacity.get()
    }

    pub fn title_origin(&self) -> Point<Pixels> {
        let b = self.expanded_bounds();
        point(b.origin.x + px(35.0), b.origin.y + px(15.0))
    }

    pub fn glyph_origin(&self) -> Point<Pixels> {
        point(self.anchor.x - px(10.0), self.anchor.y - px(10.0))
    }

    /// The hit region switches size immediately; only the visuals animate.
    pub fn hit_region(&self) -> Bounds<Pixels> {
        if self.expanded {
            self.expanded_bounds()
        } else {
            self.collapsed_bounds()
        }
    }

    pub fn contains(&self, p: Point<Pixels>) -> bool {
        self.hit_region().contains(&p)
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        self.expanded = true;
        let target = self.expanded_bounds();
        self.frame.animate_to(target, FADE_DURATION, now);
        self.content_opacity.animate_to(1.0, FADE_DURATION, now);
        self.glyph_opacity.animate_to(0.0, FADE_DURATION, now);
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.expanded = false;
        let target = self.collapsed_bounds();
        self.frame.animate_to(target, FADE_DURATION, now);
        self.content_opacity.animate_to(0.0, FADE_DURATION, now);
        self.glyph_opacity.animate_to(1.0, FADE_DURATION, now);
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_animating()
            || self.content_opacity.is_animating()
            || self.glyph_opacity.is_animating()
    }

    /// Returns whether any part of the legend is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        let a = self.frame.tick(now);
        let b = self.content_opacity.tick(now);
        let c = self.glyph_opacity.tick(now);
        a || b || c
    }
}
