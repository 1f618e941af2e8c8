//! Drawing surface abstraction.
//!
//! The scene only ever issues three kinds of drawing calls, so any backend
//! that can fill a rectangle, stroke a round-capped line and fill a disc
//! with a radial gradient can host it. [`Pixmap`](crate::Pixmap) is the
//! CPU implementation used by the window and by headless rendering.

use glam::{Vec2, Vec4};

/// A drawable 2D surface measured in device pixels.
pub trait Surface {
    /// Width and height in device pixels.
    fn size(&self) -> (u32, u32);

    /// Blend a solid rectangle over the surface.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4);

    /// Stroke a straight segment with round caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4);

    /// Fill a disc, coloring each point from `gradient`.
    fn fill_disc(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient);
}

/// One color stop of a [`RadialGradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position between the inner (0.0) and outer (1.0) radius.
    pub offset: f32,
    /// RGBA color at this offset.
    pub color: Vec4,
}

/// Radial gradient between two concentric circles.
///
/// Points inside the inner radius take the first stop's color and points
/// beyond the outer radius take the last stop's color. Between stops the
/// color is interpolated with premultiplied alpha, so fading to a
/// transparent stop does not darken the fringe.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Create a gradient with no stops (fully transparent).
    pub fn new(center: Vec2, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    /// Add a color stop. Stops are kept sorted by offset; the offset is
    /// clamped to 0.0-1.0.
    pub fn with_stop(mut self, offset: f32, color: Vec4) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let index = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(index, ColorStop { offset, color });
        self
    }

    /// Color stops in ascending offset order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `point`.
    pub fn color_at(&self, point: Vec2) -> Vec4 {
        self.color_at_distance(point.distance(self.center))
    }

    /// Color at a distance from the gradient center.
    pub fn color_at_distance(&self, distance: f32) -> Vec4 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Vec4::ZERO,
        };

        let span = self.outer_radius - self.inner_radius;
        let t = if span > 0.0 {
            ((distance - self.inner_radius) / span).clamp(0.0, 1.0)
        } else if distance < self.inner_radius {
            0.0
        } else {
            1.0
        };

        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let width = b.offset - a.offset;
                let f = if width > 0.0 { (t - a.offset) / width } else { 1.0 };
                return mix_premultiplied(a.color, b.color, f);
            }
        }

        last.color
    }
}

fn mix_premultiplied(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    let pa = (a.truncate() * a.w).extend(a.w);
    let pb = (b.truncate() * b.w).extend(b.w);
    let p = pa.lerp(pb, t);
    if p.w > 0.0 {
        (p.truncate() / p.w).extend(p.w)
    } else {
        Vec4::ZERO
    }
}
