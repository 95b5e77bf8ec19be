//! Choosing the target canvas group for a gesture.
//!
//! Every strategy is a pure function of [`NextCanvasGroupCriteria`]. The
//! returned index is signed and unclamped; callers clamp it through
//! [`CanvasGroups::constrain_to_range`](crate::CanvasGroups::constrain_to_range).

use crate::model::{Direction, ScrollDirection, ViewerMode, ViewingDirection};

/// Inputs to a next-group decision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NextCanvasGroupCriteria {
    /// Drag speed in pixels per second. `None` means unknown (treated as
    /// fast by the dashboard strategy).
    pub speed: Option<f64>,
    pub direction: Direction,
    /// Index the registry currently holds.
    pub current_canvas_group_index: isize,
    /// Index of the group nearest the viewport center.
    pub current_canvas_group_center: isize,
    /// Whether the drag-end counter has seen enough edge overshoots.
    pub canvas_group_end_hit_count_reached: bool,
    pub viewing_direction: ViewingDirection,
    pub scroll_direction: ScrollDirection,
}

impl NextCanvasGroupCriteria {
    pub fn new(
        direction: Direction,
        current_canvas_group_index: isize,
        viewing_direction: ViewingDirection,
        scroll_direction: ScrollDirection,
    ) -> Self {
        Self {
            speed: None,
            direction,
            current_canvas_group_index,
            current_canvas_group_center: current_canvas_group_index,
            canvas_group_end_hit_count_reached: false,
            viewing_direction,
            scroll_direction,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_center(mut self, center: isize) -> Self {
        self.current_canvas_group_center = center;
        self
    }

    pub fn with_end_hit_count_reached(mut self, reached: bool) -> Self {
        self.canvas_group_end_hit_count_reached = reached;
        self
    }

    /// `+1` for a swipe toward later groups, `-1` toward earlier ones, or
    /// `None` if the direction is not along the scroll axis.
    ///
    /// Swiping left (or up) pulls later content into view in LTR; RTL
    /// mirrors it.
    fn step_sign(&self) -> Option<isize> {
        let forward = match (self.scroll_direction, self.direction) {
            (ScrollDirection::Horizontal, Direction::Left) => true,
            (ScrollDirection::Horizontal, Direction::Right) => false,
            (ScrollDirection::Vertical, Direction::Up) => true,
            (ScrollDirection::Vertical, Direction::Down) => false,
            _ => return None,
        };
        let sign = if forward { 1 } else { -1 };
        Some(match self.viewing_direction {
            ViewingDirection::Ltr => sign,
            ViewingDirection::Rtl => -sign,
        })
    }
}

/// Speed bands for the dashboard strategy. Vertical thresholds are higher
/// because vertical flicks read faster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedThresholds {
    pub one: f64,
    pub three: f64,
    pub five: f64,
    pub max: f64,
}

impl SpeedThresholds {
    pub const HORIZONTAL: Self = Self {
        one: 500.0,
        three: 1500.0,
        five: 2500.0,
        max: 3500.0,
    };
    pub const VERTICAL: Self = Self {
        one: 1000.0,
        three: 3000.0,
        five: 5000.0,
        max: 7000.0,
    };

    pub fn for_axis(scroll_direction: ScrollDirection) -> Self {
        match scroll_direction {
            ScrollDirection::Horizontal => Self::HORIZONTAL,
            ScrollDirection::Vertical => Self::VERTICAL,
        }
    }

    /// Number of groups to jump at `speed`.
    pub fn groups_to_go(&self, speed: Option<f64>) -> isize {
        match speed {
            None => 10,
            Some(s) if s < self.one => 0,
            Some(s) if s < self.three => 1,
            Some(s) if s < self.five => 3,
            Some(s) if s < self.max => 5,
            Some(_) => 10,
        }
    }
}

/// Next-group policy, one per viewer mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NextCanvasGroupStrategy {
    /// Speed-banded multi-group jumps.
    Dashboard,
    /// Single steps on a fast swipe, otherwise snap to the centered group.
    Page {
        /// Minimum speed for a page turn.
        speed_threshold: f64,
    },
    /// Single steps, but only after repeated edge overshoots.
    PageZoomed,
    /// Explicit next/previous.
    Navigator,
}

impl NextCanvasGroupStrategy {
    pub const DEFAULT_PAGE_SPEED_THRESHOLD: f64 = 200.0;

    pub fn for_mode(mode: ViewerMode) -> Self {
        match mode {
            ViewerMode::Dashboard => Self::Dashboard,
            ViewerMode::Page => Self::Page {
                speed_threshold: Self::DEFAULT_PAGE_SPEED_THRESHOLD,
            },
            ViewerMode::PageZoomed => Self::PageZoomed,
            ViewerMode::Navigator => Self::Navigator,
        }
    }

    pub fn calculate_next_canvas_group(&self, criteria: &NextCanvasGroupCriteria) -> isize {
        let current = criteria.current_canvas_group_index;
        let next = match *self {
            Self::Dashboard => {
                let delta = SpeedThresholds::for_axis(criteria.scroll_direction).groups_to_go(criteria.speed);
                if delta == 0 {
                    criteria.current_canvas_group_center
                } else {
                    criteria.step_sign().map_or(current, |sign| current + sign * delta)
                }
            }
            Self::Page { speed_threshold } => match (criteria.speed, criteria.step_sign()) {
                (Some(speed), sign) if speed >= speed_threshold => current + sign.unwrap_or(0),
                _ if criteria.current_canvas_group_center != current => criteria.current_canvas_group_center,
                _ => current,
            },
            Self::PageZoomed => match criteria.step_sign() {
                Some(sign) if criteria.canvas_group_end_hit_count_reached => current + sign,
                _ => current,
            },
            Self::Navigator => match criteria.direction {
                Direction::Next => current + 1,
                Direction::Previous => current - 1,
                _ => current,
            },
        };
        tracing::trace!(strategy = ?self, current, next, direction = ?criteria.direction, "next canvas group");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(direction: Direction, index: isize) -> NextCanvasGroupCriteria {
        NextCanvasGroupCriteria::new(direction, index, ViewingDirection::Ltr, ScrollDirection::Horizontal)
    }

    fn vertical(direction: Direction, index: isize) -> NextCanvasGroupCriteria {
        NextCanvasGroupCriteria::new(direction, index, ViewingDirection::Ltr, ScrollDirection::Vertical)
    }

    fn rtl(mut c: NextCanvasGroupCriteria) -> NextCanvasGroupCriteria {
        c.viewing_direction = ViewingDirection::Rtl;
        c
    }

    // ── factory ──

    #[test]
    fn factory_by_mode() {
        assert_eq!(
            NextCanvasGroupStrategy::for_mode(ViewerMode::Dashboard),
            NextCanvasGroupStrategy::Dashboard
        );
        assert_eq!(
            NextCanvasGroupStrategy::for_mode(ViewerMode::Page),
            NextCanvasGroupStrategy::Page {
                speed_threshold: 200.0
            }
        );
        assert_eq!(
            NextCanvasGroupStrategy::for_mode(ViewerMode::PageZoomed),
            NextCanvasGroupStrategy::PageZoomed
        );
        assert_eq!(
            NextCanvasGroupStrategy::for_mode(ViewerMode::Navigator),
            NextCanvasGroupStrategy::Navigator
        );
    }

    // ── dashboard ──

    #[test]
    fn dashboard_horizontal_bands() {
        let s = NextCanvasGroupStrategy::Dashboard;
        let c = |speed| horizontal(Direction::Left, 10).with_speed(speed);
        assert_eq!(s.calculate_next_canvas_group(&c(499.0)), 10, "below first band stays");
        assert_eq!(s.calculate_next_canvas_group(&c(500.0)), 11);
        assert_eq!(s.calculate_next_canvas_group(&c(1499.0)), 11);
        assert_eq!(s.calculate_next_canvas_group(&c(1500.0)), 13);
        assert_eq!(s.calculate_next_canvas_group(&c(2500.0)), 15);
        assert_eq!(s.calculate_next_canvas_group(&c(3499.0)), 15);
        assert_eq!(s.calculate_next_canvas_group(&c(3500.0)), 20);
    }

    #[test]
    fn dashboard_unknown_speed_jumps_ten() {
        let s = NextCanvasGroupStrategy::Dashboard;
        assert_eq!(s.calculate_next_canvas_group(&horizontal(Direction::Right, 20)), 10);
    }

    #[test]
    fn dashboard_vertical_bands() {
        let s = NextCanvasGroupStrategy::Dashboard;
        let c = |speed| vertical(Direction::Up, 10).with_speed(speed);
        assert_eq!(s.calculate_next_canvas_group(&c(999.0)), 10);
        assert_eq!(s.calculate_next_canvas_group(&c(1000.0)), 11);
        assert_eq!(s.calculate_next_canvas_group(&c(3000.0)), 13);
        assert_eq!(s.calculate_next_canvas_group(&c(5000.0)), 15);
        assert_eq!(s.calculate_next_canvas_group(&c(7000.0)), 20);
        let down = vertical(Direction::Down, 10).with_speed(1000.0);
        assert_eq!(s.calculate_next_canvas_group(&down), 9);
    }

    #[test]
    fn dashboard_zero_delta_returns_center() {
        let s = NextCanvasGroupStrategy::Dashboard;
        let c = horizontal(Direction::Left, 10).with_speed(100.0).with_center(12);
        assert_eq!(s.calculate_next_canvas_group(&c), 12);
    }

    #[test]
    fn dashboard_rtl_mirrors() {
        let s = NextCanvasGroupStrategy::Dashboard;
        let c = rtl(horizontal(Direction::Left, 10).with_speed(600.0));
        assert_eq!(s.calculate_next_canvas_group(&c), 9);
        let c = rtl(horizontal(Direction::Right, 10).with_speed(600.0));
        assert_eq!(s.calculate_next_canvas_group(&c), 11);
    }

    #[test]
    fn dashboard_cross_axis_swipe_stays() {
        let s = NextCanvasGroupStrategy::Dashboard;
        let c = horizontal(Direction::Up, 10).with_speed(600.0);
        assert_eq!(s.calculate_next_canvas_group(&c), 10);
        let c = vertical(Direction::Left, 10).with_speed(2000.0);
        assert_eq!(s.calculate_next_canvas_group(&c), 10);
    }

    // ── page ──

    #[test]
    fn page_fast_swipe_steps_one() {
        let s = NextCanvasGroupStrategy::for_mode(ViewerMode::Page);
        assert_eq!(
            s.calculate_next_canvas_group(&horizontal(Direction::Left, 3).with_speed(200.0)),
            4
        );
        assert_eq!(
            s.calculate_next_canvas_group(&horizontal(Direction::Right, 3).with_speed(900.0)),
            2
        );
        assert_eq!(
            s.calculate_next_canvas_group(&rtl(horizontal(Direction::Left, 3)).with_speed(900.0)),
            2
        );
        assert_eq!(
            s.calculate_next_canvas_group(&vertical(Direction::Up, 3).with_speed(900.0)),
            4
        );
    }

    #[test]
    fn page_slow_drag_snaps_to_center() {
        let s = NextCanvasGroupStrategy::for_mode(ViewerMode::Page);
        let c = horizontal(Direction::Left, 3).with_speed(150.0).with_center(4);
        assert_eq!(s.calculate_next_canvas_group(&c), 4);
        let c = horizontal(Direction::Left, 3).with_speed(150.0);
        assert_eq!(s.calculate_next_canvas_group(&c), 3);
    }

    #[test]
    fn page_fast_cross_axis_stays() {
        let s = NextCanvasGroupStrategy::for_mode(ViewerMode::Page);
        let c = horizontal(Direction::Down, 3).with_speed(900.0).with_center(5);
        assert_eq!(s.calculate_next_canvas_group(&c), 3);
    }

    // ── page zoomed ──

    #[test]
    fn zoomed_needs_hit_count() {
        let s = NextCanvasGroupStrategy::PageZoomed;
        let c = horizontal(Direction::Left, 3).with_speed(900.0);
        assert_eq!(s.calculate_next_canvas_group(&c), 3);
        let c = c.with_end_hit_count_reached(true);
        assert_eq!(s.calculate_next_canvas_group(&c), 4);
        let c = horizontal(Direction::Right, 3).with_end_hit_count_reached(true);
        assert_eq!(s.calculate_next_canvas_group(&c), 2);
    }

    // ── navigator ──

    #[test]
    fn navigator_steps_by_direction() {
        let s = NextCanvasGroupStrategy::Navigator;
        let c = horizontal(Direction::Next, 4);
        assert_eq!(s.calculate_next_canvas_group(&c), 5);
        let c = horizontal(Direction::Previous, 4);
        assert_eq!(s.calculate_next_canvas_group(&c), 3);
        let c = horizontal(Direction::Previous, 0);
        assert_eq!(s.calculate_next_canvas_group(&c), -1, "unclamped");
    }
}
