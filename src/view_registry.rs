//! View orchestration.
//!
//! [`ViewRegistry`] owns the three canvases (short-term, long-term systolic,
//! long-term diastolic). Each canvas is created on the first draw of its slot and
//! cleared, never recreated, on later redraws. [`ViewOrchestrator`] runs the
//! redraw pass for a slot: layout, grid, axes, zones, points, title, legend.
//!
//! Redraws are synchronous and must not be nested; the registry is the single
//! writer of every canvas.

use crate::data_types::{ChartSettings, Encounter, Patient, Sex, ViewSettings};
use crate::layout::{ViewConfig, ViewMode};
use crate::legend::LegendOverlay;
use crate::plot::{HoverHandle, HoverId, PlotRenderer};
use crate::rendering::{
    paint_grid, paint_h_axis_labels, paint_series_title, paint_v_axis_labels, paint_zones,
};
use crate::surface::{DrawingSurface, Role};
use crate::theme::ChartTheme;
use crate::tooltip::Tooltip;
use crate::zones::ZoneDefinition;
use gpui::{Pixels, Point};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    ShortTerm,
    LongTermSystolic,
    LongTermDiastolic,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 3] = [
        ViewSlot::ShortTerm,
        ViewSlot::LongTermSystolic,
        ViewSlot::LongTermDiastolic,
    ];

    pub fn mode(&self) -> ViewMode {
        match self {
            Self::ShortTerm => ViewMode::ShortTerm,
            Self::LongTermSystolic => ViewMode::LongTerm { systolic: true },
            Self::LongTermDiastolic => ViewMode::LongTerm { systolic: false },
        }
    }

    pub fn settings<'a>(&self, settings: &'a ChartSettings) -> &'a ViewSettings {
        match self {
            Self::ShortTerm => &settings.short_term,
            Self::LongTermSystolic => &settings.long_term_systolic,
            Self::LongTermDiastolic => &settings.long_term_diastolic,
        }
    }

    /// The systolic long-term chart shares the diastolic chart's legend.
    pub fn has_legend(&self) -> bool {
        !matches!(self, Self::LongTermSystolic)
    }
}

/// Host page elements the views bind to.
pub trait ViewHost {
    /// Whether the named container exists and is currently shown.
    fn is_visible(&self, container_id: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ViewHost for F {
    fn is_visible(&self, container_id: &str) -> bool {
        self(container_id)
    }
}

/// External templating collaborator for the table view.
pub trait TableRenderer {
    fn render_table(&mut self, container_id: &str, encounters: &[Encounter]);
}

impl<F: FnMut(&str, &[Encounter])> TableRenderer for F {
    fn render_table(&mut self, container_id: &str, encounters: &[Encounter]) {
        self(container_id, encounters)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Marker(HoverId),
    Legend,
}

/// One drawing slot: its surface plus the interactive overlays attached to it.
#[derive(Clone, Debug)]
pub struct CanvasContext {
    pub slot: ViewSlot,
    pub surface: DrawingSurface,
    config: Option<ViewConfig>,
    hover_handles: Vec<HoverHandle>,
    tooltip: Tooltip,
    legend: Option<LegendOverlay>,
    hovered: Option<HitTarget>,
}

impl CanvasContext {
    fn new(slot: ViewSlot, width: f32, height: f32) -> Self {
        Self {
            slot,
            surface: DrawingSurface::new(width, height),
            config: None,
            hover_handles: Vec::new(),
            tooltip: Tooltip::new(),
            legend: None,
            hovered: None,
        }
    }

    /// Erases everything drawn on this canvas and resets its overlays.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.hover_handles.clear();
        self.tooltip = Tooltip::new();
        self.legend = None;
        self.hovered = None;
    }

    /// Geometry of the last completed redraw.
    pub fn config(&self) -> Option<&ViewConfig> {
        self.config.as_ref()
    }

    pub fn hover_handles(&self) -> &[HoverHandle] {
        &self.hover_handles
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn legend(&self) -> Option<&LegendOverlay> {
        self.legend.as_ref()
    }

    pub fn hovered(&self) -> Option<HitTarget> {
        self.hovered
    }

    /// Front-most target under `p`: the legend trigger, then markers drawn last first.
    pub fn hit_test(&self, p: Point<Pixels>) -> Option<HitTarget> {
        if self.legend.as_ref().is_some_and(|l| l.contains(p)) {
            return Some(HitTarget::Legend);
        }
        self.hover_handles
            .iter()
            .rev()
            .find(|h| h.contains(p))
            .map(|h| HitTarget::Marker(h.id))
    }

    pub fn pointer_enter(&mut self, target: HitTarget, now: Instant) {
        self.pointer_leave(now);
        match target {
            HitTarget::Marker(id) => {
                let Some(handle) = self.hover_handles.get(id) else {
                    return;
                };
                trace!(slot = ?self.slot, marker = id, "hover enter");
                handle.highlight(&mut self.surface);
                self.tooltip.pointer_enter(handle, self.surface.width(), now);
            }
            HitTarget::Legend => {
                let Some(legend) = self.legend.as_mut() else {
                    return;
                };
                trace!(slot = ?self.slot, "legend expand");
                legend.pointer_enter(now);
            }
        }
        self.hovered = Some(target);
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        match self.hovered.take() {
            Some(HitTarget::Marker(id)) => {
                if let Some(handle) = self.hover_handles.get(id) {
                    handle.restore(&mut self.surface);
                }
                self.tooltip.pointer_leave();
            }
            Some(HitTarget::Legend) => {
                if let Some(legend) = self.legend.as_mut() {
                    legend.pointer_leave(now);
                }
            }
            None => {}
        }
    }

    /// Dispatches enter/leave for a pointer at `p`. Returns whether the hover target changed.
    pub fn pointer_move(&mut self, p: Point<Pixels>, now: Instant) -> bool {
        let target = self.hit_test(p);
        if target == self.hovered {
            return false;
        }
        match target {
            Some(t) => self.pointer_enter(t, now),
            None => self.pointer_leave(now),
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.tooltip.is_animating() || self.legend.as_ref().is_some_and(|l| l.is_animating())
    }

    /// Advances overlay animations. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let tooltip = self.tooltip.tick(now);
        let legend = self.legend.as_mut().is_some_and(|l| l.tick(now));
        tooltip || legend
    }
}

/// The per-session canvases, one per [`ViewSlot`].
#[derive(Debug, Default)]
pub struct ViewRegistry {
    canvases: HashMap<ViewSlot, CanvasContext>,
    /// Duration of the last redraw of each slot, in nanoseconds.
    paint_times: Arc<RwLock<HashMap<ViewSlot, u64>>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self, slot: ViewSlot) -> Option<&CanvasContext> {
        self.canvases.get(&slot)
    }

    pub fn canvas_mut(&mut self, slot: ViewSlot) -> Option<&mut CanvasContext> {
        self.canvases.get_mut(&slot)
    }

    /// Returns the slot's canvas, creating it on first use.
    pub fn ensure_canvas(&mut self, slot: ViewSlot, width: f32, height: f32) -> &mut CanvasContext {
        self.canvases.entry(slot).or_insert_with(|| {
            info!(?slot, width, height, "creating canvas");
            CanvasContext::new(slot, width, height)
        })
    }

    pub fn clear(&mut self, slot: ViewSlot) {
        if let Some(canvas) = self.canvases.get_mut(&slot) {
            canvas.clear();
        }
    }

    pub fn clear_long_term(&mut self) {
        self.clear(ViewSlot::LongTermSystolic);
        self.clear(ViewSlot::LongTermDiastolic);
    }

    pub fn clear_all(&mut self) {
        for slot in ViewSlot::ALL {
            self.clear(slot);
        }
    }

    pub fn paint_times(&self) -> Arc<RwLock<HashMap<ViewSlot, u64>>> {
        self.paint_times.clone()
    }

    pub fn last_paint_nanos(&self, slot: ViewSlot) -> Option<u64> {
        self.paint_times.read().get(&slot).copied()
    }
}

/// Drives the redraw passes of every view.
#[derive(Clone, Debug, Default)]
pub struct ViewOrchestrator {
    pub settings: ChartSettings,
    pub theme: ChartTheme,
}

impl ViewOrchestrator {
    pub fn new(settings: ChartSettings, theme: ChartTheme) -> Self {
        Self { settings, theme }
    }

    /// Full redraw: the short-term view from the most recent encounters of
    /// `patient`, the long-term views and the table from `long_term`.
    pub fn draw_views(
        &self,
        registry: &mut ViewRegistry,
        host: &dyn ViewHost,
        table: &mut dyn TableRenderer,
        patient: &Patient,
        long_term: &Patient,
        zones: &ZoneDefinition,
    ) {
        debug!(
            encounters = patient.len(),
            long_term = long_term.len(),
            "drawing all views"
        );
        self.clear_views(registry);

        let recent = patient.recent_encounters(self.settings.recent_count);
        self.draw_graph(registry, host, ViewSlot::ShortTerm, patient.sex, recent.as_slice(), zones);
        self.draw_long_term(registry, host, long_term, zones);
        self.redraw_table(table, long_term);
    }

    /// Erases every canvas created so far. Canvases are kept for the next pass.
    pub fn clear_views(&self, registry: &mut ViewRegistry) {
        registry.clear_all();
    }

    /// Redraw after a long-term filter change; the short-term view is untouched.
    pub fn redraw_long_term(
        &self,
        registry: &mut ViewRegistry,
        host: &dyn ViewHost,
        long_term: &Patient,
        zones: &ZoneDefinition,
    ) {
        registry.clear_long_term();
        self.draw_long_term(registry, host, long_term, zones);
    }

    pub fn redraw_table(&self, table: &mut dyn TableRenderer, long_term: &Patient) {
        table.render_table(&self.settings.table_container_id, long_term.encounters());
    }

    fn draw_long_term(
        &self,
        registry: &mut ViewRegistry,
        host: &dyn ViewHost,
        long_term: &Patient,
        zones: &ZoneDefinition,
    ) {
        for slot in [ViewSlot::LongTermSystolic, ViewSlot::LongTermDiastolic] {
            self.draw_graph(registry, host, slot, long_term.sex, long_term.encounters(), zones);
        }
    }

    /// Redraws one slot from scratch. Returns `false` when the slot's container
    /// is hidden or missing and nothing was drawn.
    pub fn draw_graph(
        &self,
        registry: &mut ViewRegistry,
        host: &dyn ViewHost,
        slot: ViewSlot,
        sex: Sex,
        encounters: &[Encounter],
        zones: &ZoneDefinition,
    ) -> bool {
        let settings = slot.settings(&self.settings);
        let config = ViewConfig::resolve(settings, slot.mode(), encounters.len(), &self.theme);

        // Text measured inside a hidden container comes out misplaced.
        if !host.is_visible(&config.container_id) {
            debug!(?slot, container = %config.container_id, "skipping hidden view");
            return false;
        }

        let start = Instant::now();
        let paint_times = registry.paint_times();
        let canvas = registry.ensure_canvas(slot, config.width, config.height);
        canvas.clear();
        canvas.surface.set_size(config.width, config.height);

        let theme = &config.theme;
        let (x, y, w, h) = config.grid_area();
        let long_term = !config.is_short_term();
        let time_range = encounters
            .first()
            .zip(encounters.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));

        let surface = &mut canvas.surface;
        paint_grid(
            surface,
            x + 0.5,
            y + 0.5,
            w,
            h,
            config.grid_cols,
            config.grid_rows,
            theme.grid_line,
        );
        paint_v_axis_labels(
            surface,
            x - 15.0,
            y + 0.5,
            h,
            config.v_labels,
            config.max_value,
            config.v_axis_label.as_deref(),
            theme.axis_label,
            long_term,
        );
        if long_term && config.even_spacing && !config.is_systolic() {
            if let Some((first, last)) = time_range {
                paint_h_axis_labels(
                    surface,
                    x,
                    config.height - 70.0,
                    w,
                    config.time_axis_divisions,
                    first,
                    last,
                    theme.axis_label,
                );
            }
        }
        if long_term {
            paint_zones(surface, x, y, w, h, zones);
        }

        let mut handles = Vec::new();
        let renderer = PlotRenderer::new(&config, zones, sex);
        if long_term {
            renderer.render_long_term(surface, &mut handles, encounters, time_range);
        } else {
            renderer.render_short_term(surface, &mut handles, encounters);
        }

        // Hit regions must sit above every painted layer to receive the pointer.
        surface.role_to_front(Role::HitRegion);

        if long_term {
            paint_series_title(surface, &config);
        }

        if slot.has_legend() {
            let (lx, ly) = config.legend_anchor();
            canvas.legend = Some(LegendOverlay::new(lx, ly, zones));
        }

        canvas.hover_handles = handles;
        canvas.config = Some(config);

        let nanos = start.elapsed().as_nanos() as u64;
        paint_times.write().insert(slot, nanos);
        debug!(?slot, markers = canvas.hover_handles.len(), nanos, "view drawn");
        true
    }
}
