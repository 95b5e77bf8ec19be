//! Viewer state enums and the canvas data model.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::geometry::{Rect, Size};

/// Gesture or navigation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Previous,
    Next,
    Undefined,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Edge of a canvas group the viewport has been panned past.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis along which canvas groups flow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Reading direction of the manifest.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewingDirection {
    #[default]
    Ltr,
    Rtl,
}

/// One canvas per group, or book-style spreads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewerLayout {
    OnePage,
    #[default]
    TwoPage,
}

/// Interaction mode of the viewer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewerMode {
    /// Zoomed out overview with several groups visible.
    Dashboard,
    /// One group fitted to the viewport.
    #[default]
    Page,
    /// Zoomed in past the fitted level.
    PageZoomed,
    /// Programmatic next/previous navigation.
    Navigator,
}

/// Sticky fit mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitTo {
    #[default]
    None,
    Width,
    Height,
}

/// Raw image descriptor for one canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSource {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Physical-size correction from the image service, if the manifest
    /// provides one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub physical_scale: Option<f64>,
}

impl CanvasSource {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            physical_scale: None,
        }
    }

    pub const fn with_physical_scale(mut self, scale: f64) -> Self {
        self.physical_scale = Some(scale);
        self
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A canvas paired with its placed rect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileSourceAndRect {
    /// Index of the canvas in the manifest sequence.
    pub canvas_index: usize,
    pub source: CanvasSource,
    pub rect: Rect,
}

/// One page-turn unit: a single canvas or a two-canvas spread.
///
/// `tiles` is in visual order along the stacking axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasGroup {
    pub tiles: Vec<TileSourceAndRect>,
    /// Union of the member rects.
    pub rect: Rect,
}

impl CanvasGroup {
    /// Canvas indices of the members, ascending.
    pub fn canvas_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.tiles.iter().map(|t| t.canvas_index).collect();
        indices.sort_unstable();
        indices
    }
}
