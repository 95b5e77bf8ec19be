//! Moving the viewport to a canvas group.
//!
//! Turning to a group either centers it or, when the user is zoomed in and
//! wants to keep the zoom, lands on the edge of the group the user enters
//! from: the leading edge when moving forward, the trailing edge when
//! moving back. Groups smaller than the viewport on that axis are always
//! centered on it.

use crate::canvas_groups::CanvasGroups;
use crate::config::ViewerConfig;
use crate::geometry::Point;
use crate::mode::{ModeChanges, ModeService};
use crate::model::{Direction, FitTo, ScrollDirection, ViewerLayout, ViewingDirection};
use crate::next_group::{NextCanvasGroupCriteria, NextCanvasGroupStrategy};
use crate::viewport::Viewport;
use crate::zoom::ZoomStrategy;

/// Go-to decisions over a borrowed viewer state. The scroll direction
/// picks the main axis.
pub struct GoToCanvasGroupStrategy<'a, V: Viewport + ?Sized> {
    pub viewport: &'a mut V,
    pub groups: &'a mut CanvasGroups,
    pub modes: &'a mut ModeService,
    pub config: &'a ViewerConfig,
    /// Group that was current before the last go-to.
    pub previous_index: &'a mut usize,
    pub layout: ViewerLayout,
    pub scroll_direction: ScrollDirection,
    pub viewing_direction: ViewingDirection,
}

impl<'a, V: Viewport + ?Sized> GoToCanvasGroupStrategy<'a, V> {
    /// Make `index` (clamped) the current group and pan to it.
    ///
    /// With fit-to enabled the mode is re-derived from the fitted zoom of
    /// the new group; the resulting transition is returned.
    pub fn go_to_canvas_group(&mut self, index: isize, immediately: bool, pan_to_center: bool) -> Option<ModeChanges> {
        if self.groups.is_empty() {
            return None;
        }
        let previous = self.groups.current_index();
        let target = self.groups.constrain_to_range(index);
        *self.previous_index = previous;
        self.groups.set_current_index(target as isize);

        let change = if self.groups.is_fit_to_enabled() {
            self.update_viewer_mode_for_fit()
        } else {
            None
        };

        let center = if pan_to_center || self.should_pan_to_center() {
            self.groups.current_group_rect().center()
        } else {
            self.target_center(previous, target)
        };
        tracing::debug!(previous, target, requested = index, x = center.x, y = center.y, "go to canvas group");
        self.viewport.pan_to(center, immediately);
        change
    }

    /// Step to the group after the one nearest the viewport center.
    pub fn go_to_next_canvas_group(&mut self) -> Option<ModeChanges> {
        if !self.groups.is_next_valid() {
            return None;
        }
        self.step(Direction::Next)
    }

    /// Step to the group before the one nearest the viewport center.
    pub fn go_to_previous_canvas_group(&mut self) -> Option<ModeChanges> {
        if !self.groups.is_previous_valid() {
            return None;
        }
        self.step(Direction::Previous)
    }

    pub fn center_current_canvas(&mut self) {
        let center = self.groups.current_group_rect().center();
        self.viewport.pan_to(center, false);
    }

    /// Re-apply the edge alignment of the last go-to, e.g. after a fit.
    pub fn adjust_position(&mut self, immediately: bool) {
        let center = self.target_center(*self.previous_index, self.groups.current_index());
        self.viewport.pan_to(center, immediately);
    }

    /// Viewport center that shows the current group, entered from `previous`.
    pub fn target_center(&self, previous: usize, current: usize) -> Point {
        let rect = self.groups.group_rect(current).unwrap_or_default();
        let bounds = self.viewport.bounds();
        let center = self.viewport.center();
        let leading = (previous <= current) == (self.viewing_direction == ViewingDirection::Ltr);
        let start_on_top = self.config.start_on_top_on_canvas_group_change && previous != current;
        let top = rect.y + bounds.height / 2.0 - self.config.options.canvas_group_margin;
        match self.scroll_direction {
            ScrollDirection::Horizontal => {
                let x = edge_aligned(rect.x, rect.width, bounds.width, leading);
                let y = if start_on_top { top } else { center.y };
                Point::new(x, y)
            }
            ScrollDirection::Vertical => {
                let y = if start_on_top {
                    top
                } else {
                    edge_aligned(rect.y, rect.height, bounds.height, leading)
                };
                Point::new(center.x, y)
            }
        }
    }

    fn should_pan_to_center(&self) -> bool {
        let zoomed = self.modes.is_page_zoomed();
        let fit = self.groups.is_fit_to_enabled();
        (!zoomed && !fit) || (zoomed && !self.config.preserve_zoom_on_canvas_group_change)
    }

    fn step(&mut self, direction: Direction) -> Option<ModeChanges> {
        let current = self
            .groups
            .find_closest_index(Some(self.viewport.center()), self.scroll_direction)
            .unwrap_or(self.groups.current_index());
        let criteria =
            NextCanvasGroupCriteria::new(direction, current as isize, self.viewing_direction, self.scroll_direction);
        let target = NextCanvasGroupStrategy::Navigator.calculate_next_canvas_group(&criteria);
        self.go_to_canvas_group(target, false, false)
    }

    fn update_viewer_mode_for_fit(&mut self) -> Option<ModeChanges> {
        let bounds = self.viewport.bounds();
        let group = self.groups.current_group_rect();
        let fit = self.groups.fit_to();
        let mut zoom = self.zoom();
        let level = match fit {
            FitTo::Width => zoom.fit_to_width_zoom_level(bounds.width, group.width),
            FitTo::Height => zoom.fit_to_height_zoom_level(bounds.height, group.height),
            FitTo::None => return None,
        };
        let home = zoom.home_zoom_level(zoom.modes.mode());
        zoom.modes.set_viewer_mode_by_zoom_level(level, home)
    }

    fn zoom(&mut self) -> ZoomStrategy<'_, V> {
        ZoomStrategy {
            viewport: &mut *self.viewport,
            groups: &*self.groups,
            modes: &mut *self.modes,
            options: &self.config.options,
            layout: self.layout,
        }
    }
}

/// Center coordinate that puts the leading or trailing edge of a span at
/// the viewport edge, or centers the span if it fits.
fn edge_aligned(pos: f64, len: f64, viewport_len: f64, leading: bool) -> f64 {
    if len > viewport_len {
        if leading {
            pos + viewport_len / 2.0
        } else {
            pos + len - viewport_len / 2.0
        }
    } else {
        pos + len / 2.0
    }
}
