//! The rendering backend seam.
//!
//! Layout and navigation only ever talk to the renderer through
//! [`Viewport`]. Coordinates are viewport coordinates (the same space the
//! canvas-group rects live in) unless a method says pixels.

use crate::geometry::{Point, Rect};
use crate::model::CanvasSource;

/// One tiled image to register with the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TiledImage {
    /// Canvas index; also the renderer's world index.
    pub index: usize,
    pub source: CanvasSource,
    /// Un-rotated bounds, see [`Rotation::tiled_image_bounds`](crate::Rotation::tiled_image_bounds).
    pub fit_bounds: Rect,
    pub degrees: i32,
}

/// Pixel size of the element hosting the viewer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

/// Pan/zoom surface of a deep-zoom renderer.
pub trait Viewport {
    /// Visible region.
    fn bounds(&self) -> Rect;

    fn center(&self) -> Point {
        self.bounds().center()
    }

    fn zoom(&self) -> f64;

    fn max_zoom(&self) -> f64;

    fn min_zoom(&self) -> f64;

    fn set_min_zoom(&mut self, level: f64);

    fn pan_to(&mut self, center: Point, immediately: bool);

    fn pan_by(&mut self, delta: Point, immediately: bool);

    /// Zoom to `level`, keeping `anchor` fixed if given.
    fn zoom_to(&mut self, level: f64, anchor: Option<Point>);

    /// Multiply the zoom by `factor`, keeping `anchor` fixed if given.
    fn zoom_by(&mut self, factor: f64, anchor: Option<Point>);

    /// Convert a pixel position in the container to viewport coordinates.
    fn point_from_pixel(&self, pixel: Point) -> Point;

    /// Convert a pixel distance to a viewport-coordinate distance.
    fn delta_points_from_pixels(&self, pixels: Point) -> Point;

    /// Size of the area the viewer may grow into, in pixels.
    fn container_size(&self) -> ContainerSize;

    /// Whether tiled images can be rotated.
    fn supports_rotation(&self) -> bool {
        true
    }

    fn add_tiled_image(&mut self, image: TiledImage);

    /// Drop every registered tiled image.
    fn clear_tiled_images(&mut self);

    /// Enable or disable user panning per axis.
    fn set_pan_constraints(&mut self, _horizontal: bool, _vertical: bool) {}
}
