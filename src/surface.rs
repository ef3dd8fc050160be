//! Backend-free drawing surface.
//!
//! Every drawing routine in the crate records primitives into a
//! [`DrawingSurface`] instead of painting directly. The list is kept in paint
//! order (back to front) and replayed by the gpui adapter in `chart_view`.
//! Clearing a surface drops its primitives but keeps the surface itself.

use crate::theme::LabelStyle;
use gpui::*;

pub type PrimitiveId = usize;

/// What a primitive represents, used for hit testing, z-order fixes and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Grid,
    ZoneBand,
    AxisLabel,
    AxisTitle,
    DateLabel,
    SeriesPath,
    Connector,
    Marker,
    MarkerLabel,
    HitRegion,
    SeriesTitle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point<Pixels>),
    LineTo(Point<Pixels>),
}

impl PathCommand {
    pub fn point(&self) -> Point<Pixels> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => *p,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path {
        commands: Vec<PathCommand>,
        stroke: Hsla,
        width: Pixels,
    },
    Circle {
        center: Point<Pixels>,
        radius: Pixels,
        fill: Hsla,
        stroke: Hsla,
        stroke_width: Pixels,
    },
    Rect {
        bounds: Bounds<Pixels>,
        fill: Hsla,
    },
    Text {
        origin: Point<Pixels>,
        text: String,
        style: LabelStyle,
        anchor: TextAnchor,
        /// Clockwise rotation in degrees around `origin`.
        rotation: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub role: Role,
    pub shape: Shape,
    pub opacity: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingSurface {
    width: f32,
    height: f32,
    primitives: Vec<Primitive>,
    next_id: PrimitiveId,
}

pub fn rect_bounds(x: f32, y: f32, w: f32, h: f32) -> Bounds<Pixels> {
    Bounds {
        origin: point(px(x), px(y)),
        size: Size {
            width: px(w),
            height: px(h),
        },
    }
}

impl DrawingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Erases every primitive. Ids restart so a redraw reproduces the same ids.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.next_id = 0;
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn push(&mut self, role: Role, shape: Shape) -> PrimitiveId {
        let id = self.next_id;
        self.next_id += 1;
        self.primitives.push(Primitive {
            id,
            role,
            shape,
            opacity: 1.0,
        });
        id
    }

    pub fn path(
        &mut self,
        role: Role,
        commands: Vec<PathCommand>,
        stroke: Hsla,
        width: Pixels,
    ) -> PrimitiveId {
        self.push(role, Shape::Path { commands, stroke, width })
    }

    pub fn line(
        &mut self,
        role: Role,
        from: Point<Pixels>,
        to: Point<Pixels>,
        stroke: Hsla,
        width: Pixels,
    ) -> PrimitiveId {
        self.path(
            role,
            vec![PathCommand::MoveTo(from), PathCommand::LineTo(to)],
            stroke,
            width,
        )
    }

    pub fn circle(
        &mut self,
        role: Role,
        center: Point<Pixels>,
        radius: Pixels,
        fill: Hsla,
        stroke: Hsla,
        stroke_width: Pixels,
    ) -> PrimitiveId {
        self.push(
            role,
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            },
        )
    }

    pub fn rect(
        &mut self,
        role: Role,
        bounds: Bounds<Pixels>,
        fill: Hsla,
        opacity: f32,
    ) -> PrimitiveId {
        let id = self.push(role, Shape::Rect { bounds, fill });
        self.set_opacity(id, opacity);
        id
    }

    pub fn text(
        &mut self,
        role: Role,
        origin: Point<Pixels>,
        text: impl Into<String>,
        style: LabelStyle,
        anchor: TextAnchor,
    ) -> PrimitiveId {
        self.push(
            role,
            Shape::Text {
                origin,
                text: text.into(),
                style,
                anchor,
                rotation: 0.0,
            },
        )
    }

    fn index_of(&self, id: PrimitiveId) -> Option<usize> {
        self.primitives.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.index_of(id).map(|i| &self.primitives[i])
    }

    pub fn get_mut(&mut self, id: PrimitiveId) -> Option<&mut Primitive> {
        let idx = self.index_of(id)?;
        self.primitives.get_mut(idx)
    }

    pub fn set_opacity(&mut self, id: PrimitiveId, opacity: f32) {
        if let Some(p) = self.get_mut(id) {
            p.opacity = opacity;
        }
    }

    pub fn set_radius(&mut self, id: PrimitiveId, new_radius: Pixels) {
        if let Some(Primitive {
            shape: Shape::Circle { radius, .. },
            ..
        }) = self.get_mut(id)
        {
            *radius = new_radius;
        }
    }

    pub fn set_text_style(&mut self, id: PrimitiveId, new_style: LabelStyle) {
        if let Some(Primitive {
            shape: Shape::Text { style, .. },
            ..
        }) = self.get_mut(id)
        {
            *style = new_style;
        }
    }

    pub fn set_rotation(&mut self, id: PrimitiveId, degrees: f32) {
        if let Some(Primitive {
            shape: Shape::Text { rotation, .. },
            ..
        }) = self.get_mut(id)
        {
            *rotation = degrees;
        }
    }

    /// Moves a primitive behind everything drawn so far.
    pub fn to_back(&mut self, id: PrimitiveId) {
        if let Some(idx) = self.index_of(id) {
            let p = self.primitives.remove(idx);
            self.primitives.insert(0, p);
        }
    }

    /// Moves every primitive with `role` to the front, keeping their relative order.
    pub fn role_to_front(&mut self, role: Role) {
        let (front, mut rest): (Vec<_>, Vec<_>) =
            self.primitives.drain(..).partition(|p| p.role == role);
        rest.extend(front);
        self.primitives = rest;
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.role == role)
    }

    pub fn count(&self, role: Role) -> usize {
        self.with_role(role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    #[test]
    fn clear_restarts_ids() {
        let mut s = DrawingSurface::new(100.0, 100.0);
        s.rect(Role::ZoneBand, rect_bounds(0.0, 0.0, 10.0, 10.0), gpui::red(), 1.0);
        s.clear();
        let id = s.rect(Role::ZoneBand, rect_bounds(0.0, 0.0, 10.0, 10.0), gpui::red(), 1.0);
        assert_eq!(id, 0);
        assert_eq!(s.primitives().len(), 1);
    }

    #[test]
    fn z_order_moves() {
        let mut s = DrawingSurface::new(100.0, 100.0);
        let a = s.rect(Role::HitRegion, rect_bounds(0.0, 0.0, 1.0, 1.0), gpui::white(), 0.0);
        let b = s.rect(Role::ZoneBand, rect_bounds(0.0, 0.0, 1.0, 1.0), gpui::red(), 1.0);
        let c = s.rect(Role::HitRegion, rect_bounds(0.0, 0.0, 1.0, 1.0), gpui::white(), 0.0);
        s.role_to_front(Role::HitRegion);
        let ids: Vec<_> = s.primitives().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b, a, c]);
        s.to_back(c);
        assert_eq!(s.primitives()[0].id, c);
    }
}
