//! Whole-layout rotation in quarter turns.
//!
//! Rotation applies uniformly to every canvas. A sideways rotation (90 or
//! 270) swaps each canvas's width and height; 180 and 270 also reverse the
//! visual order of spread members.

use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};

/// Clockwise rotation of the whole layout.
///
/// ```text
///     Deg0        Deg90       Deg180      Deg270
///     ┌───┐       ┌─────┐     ┌───┐       ┌─────┐
///     │ F │       │  F  │     │ Ꟊ │       │  Ꟊ  │
///     │   │       └─────┘     │   │       └─────┘
///     └───┘                   └───┘
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All four rotations, in clockwise order.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Parse a rotation in degrees. Any multiple of 90 is accepted and
    /// normalized, so `360` is [`Deg0`](Self::Deg0) and `-90` is
    /// [`Deg270`](Self::Deg270).
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::UnsupportedRotation { degrees });
        }
        Ok(Self::ALL[(degrees.rem_euclid(360) / 90) as usize])
    }

    /// Angle in degrees, always in `0..360`.
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether width and height trade places (90 and 270).
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Whether spread members appear in reverse order (180 and 270).
    pub const fn reverses_order(self) -> bool {
        matches!(self, Self::Deg180 | Self::Deg270)
    }

    /// One quarter turn clockwise, wrapping 270 back to 0.
    pub const fn rotate_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Displayed size of content with the given intrinsic size.
    pub const fn transform_size(self, size: Size) -> Size {
        if self.swaps_axes() {
            size.transposed()
        } else {
            size
        }
    }

    /// Fit bounds to hand the renderer for a canvas placed at `placed`.
    ///
    /// Renderers scale before rotating, so a sideways canvas must be
    /// registered with its un-rotated extent, re-centered on the same spot.
    pub fn tiled_image_bounds(self, placed: Rect) -> Rect {
        if !self.swaps_axes() {
            return placed;
        }
        let shift = (placed.width - placed.height) / 2.0;
        Rect::new(
            placed.x + shift,
            placed.y - shift,
            placed.height,
            placed.width,
        )
    }
}
