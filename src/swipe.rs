//! Swipe classification and drag-end debouncing.

use core::f64::consts::FRAC_PI_2;

use num_traits::Float;

use crate::geometry::{Point, Rect};
use crate::model::{Direction, ScrollDirection, Side};

/// Classify a drag from `start` to `end`.
///
/// One axis must exceed the other by more than `threshold` (pass 0 for no
/// bias). Diagonal drags are [`Direction::Undefined`].
pub fn swipe_direction(start: Point, end: Point, threshold: f64) -> Direction {
    let dx = Float::abs(start.x - end.x);
    let dy = Float::abs(start.y - end.y);
    let direction = if dx > dy + threshold {
        if start.x > end.x { Direction::Left } else { Direction::Right }
    } else if dy > dx + threshold {
        if start.y > end.y { Direction::Up } else { Direction::Down }
    } else {
        Direction::Undefined
    };
    tracing::trace!(dx, dy, threshold, ?direction, "classified swipe");
    direction
}

/// Whether the viewport has been panned past an end of `group` along the
/// scroll axis.
///
/// When the group is larger than the viewport, any edge of the viewport
/// leaving the group counts. When it is smaller, the group leaving the
/// viewport's interior counts.
pub fn is_panning_outside_canvas_group(group: &Rect, viewport: &Rect, scroll_direction: ScrollDirection) -> bool {
    let (g_pos, g_len, v_pos, v_len) = axis(group, viewport, scroll_direction);
    if g_len > v_len {
        v_pos < g_pos || v_pos + v_len > g_pos + g_len
    } else {
        v_pos + v_len < g_pos + g_len || v_pos > g_pos
    }
}

/// The side of `group` the viewport has been panned past, if any:
/// [`Side::Left`]/[`Side::Right`] for horizontal scrolling,
/// [`Side::Top`]/[`Side::Bottom`] for vertical.
pub fn side_if_panning_past_end_of_canvas_group(
    group: &Rect,
    viewport: &Rect,
    scroll_direction: ScrollDirection,
) -> Option<Side> {
    if !is_panning_outside_canvas_group(group, viewport, scroll_direction) {
        return None;
    }
    let (g_pos, _, v_pos, _) = axis(group, viewport, scroll_direction);
    let before = v_pos < g_pos;
    Some(match (scroll_direction, before) {
        (ScrollDirection::Horizontal, true) => Side::Left,
        (ScrollDirection::Horizontal, false) => Side::Right,
        (ScrollDirection::Vertical, true) => Side::Top,
        (ScrollDirection::Vertical, false) => Side::Bottom,
    })
}

fn axis(group: &Rect, viewport: &Rect, scroll_direction: ScrollDirection) -> (f64, f64, f64, f64) {
    match scroll_direction {
        ScrollDirection::Horizontal => (group.x, group.width, viewport.x, viewport.width),
        ScrollDirection::Vertical => (group.y, group.height, viewport.y, viewport.height),
    }
}

/// Whether an angle in radians points into the right half-plane.
pub fn is_direction_in_right_semicircle(angle: f64) -> bool {
    angle > -FRAC_PI_2 && angle < FRAC_PI_2
}

/// Whether an angle in radians points into the left half-plane. Zero
/// counts as both.
pub fn is_direction_in_left_semicircle(angle: f64) -> bool {
    !is_direction_in_right_semicircle(angle) || angle == 0.0
}

/// Debounces page turns from elastic overshoot while zoomed in.
///
/// Two buckets count consecutive edge hits toward earlier (`previous`) and
/// later (`next`) groups. A hit on one side clears the other; dragging
/// back clears the bucket behind the drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwipeDragEndCounter {
    pub previous: u32,
    pub next: u32,
    threshold: u32,
}

impl Default for SwipeDragEndCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeDragEndCounter {
    pub const DEFAULT_THRESHOLD: u32 = 2;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            previous: 0,
            next: 0,
            threshold,
        }
    }

    pub fn reset(&mut self) {
        self.previous = 0;
        self.next = 0;
    }

    /// Record one drag end: the side overshot (if any) and the drag direction.
    pub fn add_hit(&mut self, side: Option<Side>, direction: Option<Direction>, scroll_direction: ScrollDirection) {
        if let Some(side) = side {
            match (scroll_direction, side) {
                (ScrollDirection::Horizontal, Side::Left) | (ScrollDirection::Vertical, Side::Top) => {
                    self.previous += 1;
                    self.next = 0;
                }
                (ScrollDirection::Horizontal, Side::Right) | (ScrollDirection::Vertical, Side::Bottom) => {
                    self.next += 1;
                    self.previous = 0;
                }
                _ => {}
            }
        }
        match direction {
            Some(Direction::Left | Direction::Up) => self.previous = 0,
            Some(Direction::Right | Direction::Down) => self.next = 0,
            _ => {}
        }
    }

    pub fn hit_count_reached(&self) -> bool {
        let threshold = self.threshold.max(1);
        self.previous >= threshold || self.next >= threshold
    }
}
