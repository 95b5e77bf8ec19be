//! Unpositioned canvas rects.
//!
//! A canvas rect is the displayed extent of one image: its pixel size,
//! normalized by the manifest's physical scale, with axes swapped for a
//! sideways rotation. Positioning happens later in [`crate::position`].

use crate::geometry::{Rect, Size};
use crate::model::CanvasSource;
use crate::rotation::Rotation;

/// Default reference resolution that `physical_scale` is normalized against.
pub const PHYSICAL_SCALE_REFERENCE: f64 = 400.0;

/// Scale factor applied to a canvas's pixel dimensions.
///
/// Canvases without physical-scale metadata, or when the caller opts out,
/// use a factor of 1.
pub fn scale_factor(physical_scale: Option<f64>, reference: f64, ignore_physical_scale: bool) -> f64 {
    match physical_scale {
        Some(scale) if !ignore_physical_scale && scale > 0.0 && reference > 0.0 => scale * reference,
        _ => 1.0,
    }
}

/// Build the unpositioned rect for `source` under `rotation`.
///
/// Dimensions are truncated, not rounded, so every canvas rect has whole
/// pixel extents.
pub fn build_canvas_rect(
    rotation: Rotation,
    source: &CanvasSource,
    reference: f64,
    ignore_physical_scale: bool,
) -> Rect {
    let scale = scale_factor(source.physical_scale, reference, ignore_physical_scale);
    let size = source.size();
    let scaled = Size::new(scale_extent(size.width, scale), scale_extent(size.height, scale));
    Rect::from_size(rotation.transform_size(scaled))
}

// `as` truncates toward zero and saturates at the u32 bounds.
fn scale_extent(pixels: u32, scale: f64) -> u32 {
    (pixels as f64 * scale) as u32
}
