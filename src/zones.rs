//! Percentile zones.
//!
//! A [`ZoneDefinition`] splits the 0-100 percentile axis into contiguous bands,
//! listed from the highest percentile band to the lowest. The zone engine maps a
//! percentile to the colour class of the band that contains it.

use crate::theme::hsb;
use eyre::{Result, WrapErr};
use gpui::Hsla;
use serde::{Deserialize, Serialize};

/// Hue used for markers whose percentile falls outside every band.
pub const FALLBACK_HUE: f32 = 0.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorClass {
    pub name: String,
    /// Hue in `0..=1`.
    pub hue: f32,
}

impl ColorClass {
    pub fn new(name: impl Into<String>, hue: f32) -> Self {
        Self {
            name: name.into(),
            hue,
        }
    }

    pub fn fallback() -> Self {
        Self::new("default", FALLBACK_HUE)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    pub fn marker_fill(&self) -> Hsla {
        hsb(self.hue, 0.5, 0.4)
    }

    pub fn marker_stroke(&self) -> Hsla {
        hsb(self.hue, 0.5, 1.0)
    }

    pub fn band_fill(&self) -> Hsla {
        hsb(self.hue, 0.9, 0.8)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Share of the percentile axis covered by this band.
    pub percent: f64,
    pub color: ColorClass,
    pub opacity: f32,
    pub label: String,
}

impl Zone {
    pub fn new(percent: f64, color: ColorClass, opacity: f32, label: impl Into<String>) -> Self {
        Self {
            percent,
            color,
            opacity,
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneDefinition {
    pub zones: Vec<Zone>,
}

impl ZoneDefinition {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse zone definition")
    }

    /// The reference pediatric banding: hypertensive, pre-hypertensive, normal.
    pub fn pediatric_default() -> Self {
        Self::new(vec![
            Zone::new(5.0, ColorClass::new("red", 0.0), 0.3, "Hypertension (>95%)"),
            Zone::new(5.0, ColorClass::new("orange", 0.08), 0.3, "Stage 1 (90% - 95%)"),
            Zone::new(40.0, ColorClass::new("yellow", 0.15), 0.2, "High normal (50% - 90%)"),
            Zone::new(50.0, ColorClass::new("green", 0.3), 0.2, "Normal (<50%)"),
        ])
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn total_percent(&self) -> f64 {
        self.zones.iter().map(|z| z.percent).sum()
    }

    /// Percentile intervals `[start, end]` of each band, in list order.
    ///
    /// Intervals are accumulated upwards from the 0th percentile starting with the
    /// last (lowest) band, so a list short of 100 leaves the top of the axis
    /// uncovered.
    pub fn intervals(&self) -> Vec<(f64, f64)> {
        let mut out = vec![(0.0, 0.0); self.zones.len()];
        let mut zone_start = 0.0;
        for (idx, zone) in self.zones.iter().enumerate().rev() {
            let zone_end = zone_start + zone.percent;
            out[idx] = (zone_start, zone_end);
            zone_start = zone_end;
        }
        out
    }

    /// Zone engine: colour class of the band containing `percentile`.
    ///
    /// Intervals are closed on both ends and matched walking up from the lowest
    /// band, so a percentile on a boundary resolves to the lower of the two bands.
    /// Percentiles no band covers yield [`ColorClass::fallback`].
    pub fn color_for(&self, percentile: f64) -> ColorClass {
        self.zone_for(percentile)
            .map(|z| z.color.clone())
            .unwrap_or_else(ColorClass::fallback)
    }

    pub fn zone_for(&self, percentile: f64) -> Option<&Zone> {
        let mut zone_start = 0.0;
        for zone in self.zones.iter().rev() {
            let zone_end = zone_start + zone.percent;
            if zone_start <= percentile && percentile <= zone_end {
                return Some(zone);
            }
            zone_start = zone_end;
        }
        None
    }
}

/// One background band rectangle in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneBandRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Hsla,
    pub opacity: f32,
}

/// Lays the bands out top-down over a plot area of the given size, first band on top.
pub fn zone_band_rects(
    zones: &ZoneDefinition,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Vec<ZoneBandRect> {
    let per_percent = height / 100.0;
    let mut current_y = y;
    zones
        .zones
        .iter()
        .map(|zone| {
            let band_h = zone.percent as f32 * per_percent;
            let rect = ZoneBandRect {
                x,
                y: current_y,
                width,
                height: band_h,
                fill: zone.color.band_fill(),
                opacity: zone.opacity,
            };
            current_y += band_h;
            rect
        })
        .collect()
}
