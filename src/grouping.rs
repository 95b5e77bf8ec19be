//! Assembling canvases into canvas groups.
//!
//! [`CanvasGroupStrategy`] decides which canvases share a group; the
//! [`CanvasGroupPositioner`] then places the groups. [`layout_canvases`]
//! runs both and returns a ready [`CanvasGroups`] registry.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::canvas_groups::CanvasGroups;
use crate::canvas_rect::{PHYSICAL_SCALE_REFERENCE, build_canvas_rect};
use crate::geometry::Rect;
use crate::model::{CanvasGroup, CanvasSource, ScrollDirection, TileSourceAndRect, ViewerLayout, ViewingDirection};
use crate::position::CanvasGroupPositioner;
use crate::rotation::Rotation;

/// Everything that determines a layout. Two equal `LayoutParams` over the
/// same canvases always yield identical rects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutParams {
    pub layout: ViewerLayout,
    /// Whether the manifest is paged (has spreads). Unpaged manifests are
    /// always laid out one canvas per group.
    pub paged: bool,
    pub scroll_direction: ScrollDirection,
    pub viewing_direction: ViewingDirection,
    pub rotation: Rotation,
    pub ignore_physical_scale: bool,
    /// Resolution that canvas physical scales are normalized against.
    pub physical_scale_reference: f64,
    /// Gap between groups on the main axis.
    pub margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            layout: ViewerLayout::OnePage,
            paged: true,
            scroll_direction: ScrollDirection::Horizontal,
            viewing_direction: ViewingDirection::Ltr,
            rotation: Rotation::Deg0,
            ignore_physical_scale: false,
            physical_scale_reference: PHYSICAL_SCALE_REFERENCE,
            margin: crate::config::ViewerOptions::DEFAULT_CANVAS_GROUP_MARGIN,
        }
    }
}

/// How canvases are grouped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanvasGroupStrategy {
    /// Every canvas is its own group.
    OneCanvasPerGroup,
    /// Canvas 0 is a single cover; the rest pair up as `(1,2), (3,4), ...`
    /// with a trailing single when the count leaves one over.
    TwoCanvasPerGroup,
}

impl CanvasGroupStrategy {
    pub fn for_layout(layout: ViewerLayout, paged: bool) -> Self {
        if layout == ViewerLayout::TwoPage && paged {
            Self::TwoCanvasPerGroup
        } else {
            Self::OneCanvasPerGroup
        }
    }

    /// Group `sources` into unpositioned canvas groups.
    pub fn group(
        self,
        sources: &[CanvasSource],
        rotation: Rotation,
        physical_scale_reference: f64,
        ignore_physical_scale: bool,
    ) -> Vec<CanvasGroup> {
        let tile = |i: usize| {
            let source = sources[i];
            TileSourceAndRect {
                canvas_index: i,
                source,
                rect: build_canvas_rect(rotation, &source, physical_scale_reference, ignore_physical_scale),
            }
        };

        match self {
            Self::OneCanvasPerGroup => (0..sources.len()).map(|i| single(tile(i))).collect(),
            Self::TwoCanvasPerGroup => {
                let mut groups = Vec::with_capacity(sources.len() / 2 + 1);
                if sources.is_empty() {
                    return groups;
                }
                groups.push(single(tile(0)));
                let mut i = 1;
                while i < sources.len() {
                    if i + 1 < sources.len() {
                        groups.push(pair(tile(i), tile(i + 1), rotation));
                    } else {
                        groups.push(single(tile(i)));
                    }
                    i += 2;
                }
                groups
            }
        }
    }
}

fn single(tile: TileSourceAndRect) -> CanvasGroup {
    CanvasGroup {
        rect: tile.rect,
        tiles: vec![tile],
    }
}

fn pair(first: TileSourceAndRect, second: TileSourceAndRect, rotation: Rotation) -> CanvasGroup {
    let (a, b) = (first.rect, second.rect);
    let rect = if rotation.swaps_axes() {
        Rect::new(0.0, 0.0, a.width.max(b.width), a.height + b.height)
    } else {
        Rect::new(0.0, 0.0, a.width + b.width, a.height.max(b.height))
    };
    let tiles = if rotation.reverses_order() {
        vec![second, first]
    } else {
        vec![first, second]
    };
    CanvasGroup { tiles, rect }
}

/// Group and position `sources`, producing a registry with the current
/// index at 0.
pub fn layout_canvases(sources: &[CanvasSource], params: &LayoutParams) -> CanvasGroups {
    let strategy = CanvasGroupStrategy::for_layout(params.layout, params.paged);
    let groups = strategy.group(
        sources,
        params.rotation,
        params.physical_scale_reference,
        params.ignore_physical_scale,
    );
    let positioner = CanvasGroupPositioner::for_layout(
        params.layout,
        params.paged,
        params.scroll_direction,
        params.viewing_direction,
        params.rotation,
        params.margin,
    );
    let placed = positioner.position_all(groups);
    tracing::debug!(
        canvases = sources.len(),
        groups = placed.len(),
        strategy = ?strategy,
        rotation = params.rotation.degrees(),
        "laid out canvas groups"
    );
    let layout = match strategy {
        CanvasGroupStrategy::OneCanvasPerGroup => ViewerLayout::OnePage,
        CanvasGroupStrategy::TwoCanvasPerGroup => ViewerLayout::TwoPage,
    };
    CanvasGroups::new(placed, layout)
}
