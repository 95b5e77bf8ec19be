//! Rect, point and size primitives in viewport coordinates.
//!
//! Every canvas and canvas-group rectangle lives in one shared virtual
//! coordinate space. Rects are plain values; positioning math always
//! produces a new [`Rect`].

use num_traits::Float;

/// A point in viewport coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same size with width and height exchanged.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Axis-aligned rectangle in viewport coordinates.
///
/// `width` and `height` are never negative for rects produced by this crate.
/// The center is derived, never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// An unpositioned rect of the given size, anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, moved so its top-left corner sits at `(x, y)`.
    pub fn at(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    /// Smallest rect covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Clamp `point` into this rect.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.x, self.right()),
            point.y.clamp(self.y, self.bottom()),
        )
    }
}

/// Round `value` to `digits` decimal places.
///
/// Zoom levels pass through this so repeated fit operations do not drift.
pub fn shorten_decimals(value: f64, digits: i32) -> f64 {
    let factor = Float::powi(10.0_f64, digits);
    Float::round(value * factor) / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_derived() {
        let r = Rect::new(-50.0, -100.0, 100.0, 200.0);
        assert_eq!(r.center_x(), 0.0);
        assert_eq!(r.center_y(), 0.0);
        assert_eq!(r.center(), Point::ORIGIN);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, -5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 30.0, 15.0));
    }

    #[test]
    fn clamp_point_inside_rect() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.clamp_point(Point::new(-3.0, 70.0)), Point::new(0.0, 50.0));
        assert_eq!(r.clamp_point(Point::new(40.0, 20.0)), Point::new(40.0, 20.0));
    }

    #[test]
    fn shorten_to_five_decimals() {
        assert_eq!(shorten_decimals(0.123456789, 5), 0.12346);
        assert_eq!(shorten_decimals(2.0, 5), 2.0);
    }

    #[test]
    fn from_size_anchors_at_origin() {
        let r = Rect::from_size(Size::new(100, 200));
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 200.0));
        assert_eq!(r.at(-50.0, 10.0), Rect::new(-50.0, 10.0, 100.0, 200.0));
    }

    #[test]
    fn size_transposed() {
        assert_eq!(Size::new(100, 200).transposed(), Size::new(200, 100));
    }
}
