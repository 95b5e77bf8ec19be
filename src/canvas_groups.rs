//! The canvas-group registry: laid-out rects, the current index, and the
//! fit-to toggle.
//!
//! Index queries never fail. Out-of-range requests are clamped
//! ([`CanvasGroups::constrain_to_range`]) or ignored
//! ([`CanvasGroups::set_current_index`]); "no such index" is `None`.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use num_traits::Float;

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::model::{CanvasGroup, FitTo, ScrollDirection, ViewerLayout};

/// Laid-out canvas groups plus the viewer's position among them.
///
/// `groups`, `canvases_per_group` and the per-canvas rect table always
/// describe the same layout; they are only ever rebuilt together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasGroups {
    groups: Vec<CanvasGroup>,
    canvases_per_group: Vec<Vec<usize>>,
    /// Placed rect of every canvas, indexed by canvas index.
    canvas_rects: Vec<Rect>,
    layout: ViewerLayout,
    current: usize,
    fit_to: FitTo,
}

impl CanvasGroups {
    /// Registry over already-positioned groups. The current index starts at 0.
    pub fn new(groups: Vec<CanvasGroup>, layout: ViewerLayout) -> Self {
        let canvases_per_group: Vec<Vec<usize>> = groups.iter().map(CanvasGroup::canvas_indices).collect();
        let total = groups.iter().map(|g| g.tiles.len()).sum();
        let mut canvas_rects = Vec::with_capacity(total);
        canvas_rects.resize(total, Rect::default());
        for tile in groups.iter().flat_map(|g| g.tiles.iter()) {
            if let Some(slot) = canvas_rects.get_mut(tile.canvas_index) {
                *slot = tile.rect;
            }
        }
        Self {
            groups,
            canvases_per_group,
            canvas_rects,
            layout,
            current: 0,
            fit_to: FitTo::None,
        }
    }

    // ---- Structure ----

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Layout the groups were built with; one page for unpaged manifests
    /// even if two were requested.
    pub fn layout(&self) -> ViewerLayout {
        self.layout
    }

    pub fn groups(&self) -> &[CanvasGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&CanvasGroup> {
        self.groups.get(index)
    }

    /// Like [`group`](Self::group) but reports the miss as an error.
    pub fn try_group(&self, index: usize) -> Result<&CanvasGroup> {
        self.groups.get(index).ok_or(Error::CanvasGroupOutOfRange {
            index,
            count: self.groups.len(),
        })
    }

    /// Canvas indices of every group, e.g. `[[0], [1, 2], [3, 4]]`.
    pub fn canvases_per_group(&self) -> &[Vec<usize>] {
        &self.canvases_per_group
    }

    pub fn total_canvases(&self) -> usize {
        self.canvas_rects.len()
    }

    pub fn group_rect(&self, index: usize) -> Option<Rect> {
        self.groups.get(index).map(|g| g.rect)
    }

    /// Rect of the current group, or an empty rect when there are no groups.
    pub fn current_group_rect(&self) -> Rect {
        self.group_rect(self.current).unwrap_or_default()
    }

    pub fn canvas_rect(&self, canvas_index: usize) -> Option<Rect> {
        self.canvas_rects.get(canvas_index).copied()
    }

    // ---- Range ----

    pub fn is_within_range(&self, index: isize) -> bool {
        index >= 0 && (index as usize) < self.groups.len()
    }

    /// Clamp `index` into `[0, len - 1]` (0 when empty).
    pub fn constrain_to_range(&self, index: isize) -> usize {
        if index < 0 || self.groups.is_empty() {
            0
        } else {
            (index as usize).min(self.groups.len() - 1)
        }
    }

    // ---- Current index ----

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move to `index`. Out-of-range values are ignored and the current
    /// index is kept.
    pub fn set_current_index(&mut self, index: isize) {
        if self.is_within_range(index) {
            self.current = index as usize;
        } else {
            tracing::trace!(index, count = self.groups.len(), "ignored out-of-range canvas group index");
        }
    }

    pub fn next_index(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.groups.len()).then_some(next)
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.current.checked_sub(1).filter(|&i| i < self.groups.len())
    }

    pub fn is_current_valid(&self) -> bool {
        self.current < self.groups.len()
    }

    pub fn is_next_valid(&self) -> bool {
        self.next_index().is_some()
    }

    pub fn is_previous_valid(&self) -> bool {
        self.previous_index().is_some()
    }

    /// First canvas of the current group.
    pub fn current_canvas_index(&self) -> usize {
        self.canvases_per_group
            .get(self.current)
            .and_then(|c| c.first().copied())
            .unwrap_or(0)
    }

    // ---- Lookup ----

    /// Group containing `canvas_index`.
    pub fn find_group_by_canvas_index(&self, canvas_index: usize) -> Option<usize> {
        self.canvases_per_group.iter().position(|c| c.contains(&canvas_index))
    }

    /// Group whose center is nearest `point` along the scroll axis.
    ///
    /// Group centers are monotonic along the main axis, so the distance is
    /// unimodal and the scan stops at the first local minimum.
    pub fn find_closest_index(&self, point: Option<Point>, scroll_direction: ScrollDirection) -> Option<usize> {
        let point = point?;
        let mut closest = None;
        let mut last_delta = f64::INFINITY;
        for (i, group) in self.groups.iter().enumerate() {
            let delta = match scroll_direction {
                ScrollDirection::Horizontal => Float::abs(point.x - group.rect.center_x()),
                ScrollDirection::Vertical => Float::abs(point.y - group.rect.center_y()),
            };
            if delta >= last_delta {
                break;
            }
            last_delta = delta;
            closest = Some(i);
        }
        closest
    }

    /// Human label: `"3"` for a single canvas, `"2-3"` for a spread.
    pub fn label(&self, index: usize) -> String {
        if self.canvases_per_group.is_empty() {
            return String::from("1");
        }
        let group = &self.canvases_per_group[index.min(self.canvases_per_group.len() - 1)];
        match (group.first(), group.last()) {
            (Some(first), Some(last)) if group.len() > 1 => format!("{}-{}", first + 1, last + 1),
            (Some(first), _) => format!("{}", first + 1),
            _ => String::from("1"),
        }
    }

    // ---- Fit-to ----

    pub fn fit_to(&self) -> FitTo {
        self.fit_to
    }

    pub fn is_fit_to_enabled(&self) -> bool {
        self.fit_to != FitTo::None
    }

    pub fn is_fit_to_width_enabled(&self) -> bool {
        self.fit_to == FitTo::Width
    }

    pub fn is_fit_to_height_enabled(&self) -> bool {
        self.fit_to == FitTo::Height
    }

    /// Enable fit-to-width, or turn fitting off if it already is.
    pub fn toggle_fit_to_width(&mut self) -> FitTo {
        self.toggle_fit_to(FitTo::Width)
    }

    /// Enable fit-to-height, or turn fitting off if it already is.
    pub fn toggle_fit_to_height(&mut self) -> FitTo {
        self.toggle_fit_to(FitTo::Height)
    }

    pub fn reset_fit_to(&mut self) {
        self.fit_to = FitTo::None;
    }

    fn toggle_fit_to(&mut self, fit: FitTo) -> FitTo {
        self.fit_to = if self.fit_to == fit { FitTo::None } else { fit };
        self.fit_to
    }
}
