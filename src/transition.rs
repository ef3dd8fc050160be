//! Cancellable animations.
//!
//! A [`Transition`] is plain data: start value, target, start instant and
//! duration. The host ticks it with the current instant; cancelling is dropping
//! it. [`Animated`] owns at most one in-flight transition per value, so starting
//! a new one always replaces the previous one.

use gpui::*;
use std::time::{Duration, Instant};

/// Default duration of overlay fades and resizes.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Pixels {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        let from = f32::from(*self);
        px(from.lerp(&f32::from(*to), t))
    }
}

impl Lerp for Bounds<Pixels> {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        Bounds {
            origin: point(
                self.origin.x.lerp(&to.origin.x, t),
                self.origin.y.lerp(&to.origin.y, t),
            ),
            size: Size {
                width: self.size.width.lerp(&to.size.width, t),
                height: self.size.height.lerp(&to.size.height, t),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition<T> {
    pub from: T,
    pub to: T,
    pub start: Instant,
    pub duration: Duration,
}

impl<T: Lerp> Transition<T> {
    pub fn new(from: T, to: T, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Linear progress in `0..=1`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: Instant) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to.clone()
        } else {
            self.from.lerp(&self.to, t)
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A value that is either at rest or moving towards a target.
#[derive(Clone, Debug, PartialEq)]
pub struct Animated<T> {
    current: T,
    transition: Option<Transition<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            transition: None,
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Cancels any in-flight transition and jumps to `value`.
    pub fn snap(&mut self, value: T) {
        self.transition = None;
        self.current = value;
    }

    /// Cancels any in-flight transition and starts a new one from wherever the
    /// value currently is.
    pub fn animate_to(&mut self, target: T, duration: Duration, now: Instant) {
        self.tick(now);
        self.transition = Some(Transition::new(self.current.clone(), target, now, duration));
    }

    /// Advances the value to `now`. Returns whether it is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(transition) = &self.transition {
            self.current = transition.value_at(now);
            if transition.is_finished(now) {
                self.transition = None;
            }
        }
        self.transition.is_some()
    }
}
