//! gpui host for the chart canvases.
//!
//! [`BpChartView`] shows one [`ViewSlot`] of a shared [`ViewRegistry`]. It
//! replays the slot's display list in a `canvas` element, forwards pointer
//! movement to the slot's hit regions and keeps requesting frames while an
//! overlay animation is running.

use crate::surface::{PathCommand, Shape, TextAnchor};
use crate::theme::LabelStyle;
use crate::view_registry::{CanvasContext, ViewRegistry, ViewSlot};
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

const CIRCLE_SEGMENTS: usize = 24;

fn offset_bounds(origin: Point<Pixels>, b: Bounds<Pixels>) -> Bounds<Pixels> {
    Bounds {
        origin: origin + b.origin,
        size: b.size,
    }
}

fn trace_circle(builder: &mut PathBuilder, center: Point<Pixels>, radius: f32) {
    for i in 0..=CIRCLE_SEGMENTS {
        let a = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
        let p = point(
            center.x + px(radius * a.cos()),
            center.y + px(radius * a.sin()),
        );
        if i == 0 {
            builder.move_to(p);
        } else {
            builder.line_to(p);
        }
    }
}

fn paint_circle(
    window: &mut Window,
    center: Point<Pixels>,
    radius: Pixels,
    fill: Hsla,
    stroke: Hsla,
    stroke_width: Pixels,
) {
    let mut fill_builder = PathBuilder::fill();
    trace_circle(&mut fill_builder, center, f32::from(radius));
    if let Ok(path) = fill_builder.build() {
        window.paint_path(path, fill);
    }

    let mut stroke_builder = PathBuilder::stroke(stroke_width);
    trace_circle(&mut stroke_builder, center, f32::from(radius));
    if let Ok(path) = stroke_builder.build() {
        window.paint_path(path, stroke);
    }
}

// gpui text runs have no rotation; rotated labels are painted level at their origin.
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: Point<Pixels>,
    text: &str,
    style: &LabelStyle,
    anchor: TextAnchor,
    opacity: f32,
) {
    if text.is_empty() {
        return;
    }
    let mut font = TextStyle::default().font();
    if style.bold {
        font.weight = FontWeight::BOLD;
    }
    if style.italic {
        font.style = FontStyle::Italic;
    }
    let run = TextRun {
        len: text.len(),
        font,
        color: style.color.opacity(opacity),
        background_color: None,
        underline: None,
        strikethrough: None,
    };

    if let Ok(lines) = window
        .text_system()
        .shape_text(text.to_string().into(), style.size, &[run], None, None)
    {
        for line in lines {
            let line_width = line.width();
            let dx = match anchor {
                TextAnchor::Start => px(0.0),
                TextAnchor::Middle => line_width / 2.0,
                TextAnchor::End => line_width,
            };
            let text_origin = point(origin.x - dx, origin.y - style.size / 2.0);
            let _ = line.paint(text_origin, style.size, TextAlign::Left, None, window, cx);
        }
    }
}

/// Paints a canvas' display list and overlays with its top-left corner at `origin`.
pub fn paint_canvas(
    window: &mut Window,
    cx: &mut App,
    origin: Point<Pixels>,
    canvas: &CanvasContext,
) {
    for primitive in canvas.surface.primitives() {
        let opacity = primitive.opacity;
        if opacity <= 0.0 {
            continue;
        }
        match &primitive.shape {
            Shape::Path {
                commands,
                stroke,
                width,
            } => {
                let mut builder = PathBuilder::stroke(*width);
                for command in commands {
                    match command {
                        PathCommand::MoveTo(p) => builder.move_to(origin + *p),
                        PathCommand::LineTo(p) => builder.line_to(origin + *p),
                    }
                }
                if let Ok(path) = builder.build() {
                    window.paint_path(path, stroke.opacity(opacity));
                }
            }
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => paint_circle(
                window,
                origin + *center,
                *radius,
                fill.opacity(opacity),
                stroke.opacity(opacity),
                *stroke_width,
            ),
            Shape::Rect { bounds, fill: color } => {
                window.paint_quad(gpui::fill(
                    offset_bounds(origin, *bounds),
                    color.opacity(opacity),
                ));
            }
            Shape::Text {
                origin: text_origin,
                text,
                style,
                anchor,
                ..
            } => paint_text(window, cx, origin + *text_origin, text, style, *anchor, opacity),
        }
    }

    let Some(config) = canvas.config() else {
        return;
    };
    let theme = &config.theme;

    let tooltip = canvas.tooltip();
    if tooltip.is_visible() && tooltip.opacity() > 0.0 {
        let alpha = tooltip.opacity();
        let frame = offset_bounds(origin, tooltip.frame());
        window.paint_quad(gpui::fill(frame, theme.tooltip_background.opacity(alpha)));
        window.paint_quad(gpui::outline(
            frame,
            theme.tooltip_border.opacity(alpha),
            BorderStyle::Solid,
        ));
        for item in tooltip.texts(theme) {
            paint_text(
                window,
                cx,
                origin + item.origin,
                &item.text,
                &item.style,
                item.anchor,
                alpha,
            );
        }
    }

    if let Some(legend) = canvas.legend() {
        let frame = offset_bounds(origin, legend.frame());
        window.paint_quad(gpui::fill(frame, theme.legend_background));
        window.paint_quad(gpui::outline(frame, theme.legend_border, BorderStyle::Solid));

        let glyph = legend.glyph_opacity();
        if glyph > 0.0 {
            paint_text(
                window,
                cx,
                origin + legend.glyph_origin(),
                "i",
                &theme.legend_glyph,
                TextAnchor::Middle,
                glyph,
            );
        }

        let content = legend.content_opacity();
        if content > 0.0 {
            paint_text(
                window,
                cx,
                origin + legend.title_origin(),
                "Legend",
                &theme.legend_title,
                TextAnchor::Middle,
                content,
            );
            for entry in legend.entries() {
                paint_circle(
                    window,
                    origin + entry.swatch_center,
                    px(crate::legend::SWATCH_RADIUS),
                    entry.fill.opacity(content),
                    entry.stroke.opacity(content),
                    theme.marker_stroke_width,
                );
                paint_text(
                    window,
                    cx,
                    origin + entry.label_origin,
                    &entry.label,
                    &theme.legend_text,
                    TextAnchor::Start,
                    content,
                );
            }
        }
    }
}

/// One chart slot rendered as a gpui view.
pub struct BpChartView {
    registry: Rc<RefCell<ViewRegistry>>,
    slot: ViewSlot,
    bounds: Rc<RefCell<Bounds<Pixels>>>,
    animating: bool,
}

impl BpChartView {
    pub fn new(
        registry: Rc<RefCell<ViewRegistry>>,
        slot: ViewSlot,
        _cx: &mut Context<Self>,
    ) -> Self {
        Self {
            registry,
            slot,
            bounds: Rc::new(RefCell::new(Bounds::default())),
            animating: false,
        }
    }

    pub fn slot(&self) -> ViewSlot {
        self.slot
    }

    pub fn registry(&self) -> Rc<RefCell<ViewRegistry>> {
        self.registry.clone()
    }

    fn handle_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let canvas_bounds = *self.bounds.borrow();
        let local_pos = event.position - canvas_bounds.origin;

        let changed = self
            .registry
            .borrow_mut()
            .canvas_mut(self.slot)
            .is_some_and(|c| c.pointer_move(local_pos, Instant::now()));

        if changed {
            self.start_animation(window, cx);
            cx.notify();
        }
    }

    fn start_animation(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.animating {
            return;
        }
        self.animating = true;
        self.animate(window, cx);
    }

    fn animate(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let running = self
            .registry
            .borrow_mut()
            .canvas_mut(self.slot)
            .is_some_and(|c| c.tick(Instant::now()));
        cx.notify();

        if running {
            cx.on_next_frame(window, |this, window, cx| {
                this.animate(window, cx);
            });
        } else {
            self.animating = false;
        }
    }
}

impl Render for BpChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let registry = self.registry.clone();
        let slot = self.slot;
        let bounds_rc = self.bounds.clone();

        let (width, height, background) = {
            let registry = self.registry.borrow();
            match registry.canvas(slot) {
                Some(c) => (
                    c.surface.width(),
                    c.surface.height(),
                    c.config().map(|cfg| cfg.theme.background),
                ),
                None => (0.0, 0.0, None),
            }
        };

        div()
            .w(px(width))
            .h(px(height))
            .relative()
            .when_some(background, |d, bg| d.bg(bg))
            .on_mouse_move(cx.listener(Self::handle_mouse_move))
            .child(
                canvas(|_, _, _| {}, move |bounds, (), window, cx| {
                    *bounds_rc.borrow_mut() = bounds;
                    if let Some(c) = registry.borrow().canvas(slot) {
                        paint_canvas(window, cx, bounds.origin, c);
                    }
                })
                .size_full(),
            )
    }
}
