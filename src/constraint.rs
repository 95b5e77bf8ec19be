//! Keeping the current canvas group in view.
//!
//! After the user pans, the viewport is pulled back so the cross axis of
//! the current group stays framed:
//!
//! - **Horizontal scrolling** constrains y. A group taller than the
//!   viewport may be panned within, but not past its top or bottom edge.
//!   A shorter group is centered vertically.
//! - **Vertical scrolling** constrains x the same way, but only while
//!   zoomed in. Otherwise the group is centered horizontally.
//!
//! The main axis is left alone; swiping along it turns pages.

use crate::canvas_groups::CanvasGroups;
use crate::geometry::Point;
use crate::mode::ModeService;
use crate::model::ScrollDirection;
use crate::viewport::Viewport;

/// Cross-axis constraint, selected by scroll direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintStrategy {
    Horizontal,
    Vertical,
}

impl ConstraintStrategy {
    pub fn for_scroll_direction(scroll_direction: ScrollDirection) -> Self {
        match scroll_direction {
            ScrollDirection::Horizontal => Self::Horizontal,
            ScrollDirection::Vertical => Self::Vertical,
        }
    }

    /// The viewport center that keeps the current group framed, or `None`
    /// if the viewport is already acceptable.
    pub fn constrained_center<V: Viewport + ?Sized>(
        self,
        viewport: &V,
        groups: &CanvasGroups,
        modes: &ModeService,
    ) -> Option<Point> {
        if groups.is_empty() {
            return None;
        }
        let vp = viewport.bounds();
        let group = groups.current_group_rect();
        let center = viewport.center();
        match self {
            Self::Horizontal => {
                let y = if vp.height < group.height {
                    if vp.y < group.y {
                        group.y + vp.height / 2.0
                    } else if group.bottom() < vp.bottom() {
                        group.bottom() - vp.height / 2.0
                    } else {
                        return None;
                    }
                } else {
                    group.center_y()
                };
                Some(Point::new(center.x, y))
            }
            Self::Vertical => {
                let x = if modes.is_page_zoomed() && vp.width < group.width {
                    if vp.x < group.x {
                        group.x + vp.width / 2.0
                    } else if group.right() < vp.right() {
                        group.right() - vp.width / 2.0
                    } else {
                        return None;
                    }
                } else {
                    group.center_x()
                };
                Some(Point::new(x, center.y))
            }
        }
    }

    /// Pan the viewport back into bounds if needed. Returns whether it panned.
    pub fn constrain_canvas<V: Viewport + ?Sized>(self, viewport: &mut V, groups: &CanvasGroups, modes: &ModeService) -> bool {
        match self.constrained_center(viewport, groups, modes) {
            Some(target) if target != viewport.center() => {
                tracing::trace!(strategy = ?self, x = target.x, y = target.y, "constraining viewport");
                viewport.pan_to(target, false);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{LayoutParams, layout_canvases};
    use crate::model::{CanvasSource, ViewerMode};
    use crate::zoom::tests::FakeViewport;

    /// One 100×200 group at (-50, -100).
    fn group() -> CanvasGroups {
        layout_canvases(&[CanvasSource::new(100, 200)], &LayoutParams::default())
    }

    fn at(vp: &mut FakeViewport, x: f64, y: f64) -> &mut FakeViewport {
        vp.center = Point::new(x, y);
        vp
    }

    // ── horizontal ──

    #[test]
    fn snaps_to_top_edge() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = group();
        let modes = ModeService::default();
        assert!(ConstraintStrategy::Horizontal.constrain_canvas(at(&mut vp, 0.0, -110.0), &groups, &modes));
        assert_eq!(vp.center, Point::new(0.0, -75.0));
    }

    #[test]
    fn snaps_to_bottom_edge() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = group();
        let modes = ModeService::default();
        ConstraintStrategy::Horizontal.constrain_canvas(at(&mut vp, 7.0, 110.0), &groups, &modes);
        assert_eq!(vp.center, Point::new(7.0, 75.0));
    }

    #[test]
    fn free_panning_inside_tall_group() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = group();
        let modes = ModeService::default();
        assert!(!ConstraintStrategy::Horizontal.constrain_canvas(at(&mut vp, 0.0, 30.0), &groups, &modes));
        assert!(vp.pans.is_empty());
    }

    #[test]
    fn short_group_is_centered_vertically() {
        let mut vp = FakeViewport::new(500.0, 500.0);
        let groups = group();
        let modes = ModeService::default();
        ConstraintStrategy::Horizontal.constrain_canvas(at(&mut vp, 0.0, 30.0), &groups, &modes);
        assert_eq!(vp.center, Point::new(0.0, 0.0));
        // already centered: no pan issued
        assert!(!ConstraintStrategy::Horizontal.constrain_canvas(&mut vp, &groups, &modes));
        assert_eq!(vp.pans.len(), 1);
    }

    // ── vertical ──

    #[test]
    fn zoomed_snaps_left_and_right() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = group();
        let modes = ModeService::new(ViewerMode::PageZoomed);
        ConstraintStrategy::Vertical.constrain_canvas(at(&mut vp, -40.0, 3.0), &groups, &modes);
        assert_eq!(vp.center, Point::new(-25.0, 3.0));
        ConstraintStrategy::Vertical.constrain_canvas(at(&mut vp, 40.0, 3.0), &groups, &modes);
        assert_eq!(vp.center, Point::new(25.0, 3.0));
        assert!(!ConstraintStrategy::Vertical.constrain_canvas(at(&mut vp, 10.0, 3.0), &groups, &modes));
    }

    #[test]
    fn unzoomed_centers_horizontally() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = group();
        let modes = ModeService::default();
        ConstraintStrategy::Vertical.constrain_canvas(at(&mut vp, -40.0, 3.0), &groups, &modes);
        assert_eq!(vp.center, Point::new(0.0, 3.0));
    }

    #[test]
    fn empty_layout_never_pans() {
        let mut vp = FakeViewport::new(50.0, 50.0);
        let groups = CanvasGroups::default();
        let modes = ModeService::default();
        assert_eq!(ConstraintStrategy::Vertical.constrained_center(&vp, &groups, &modes), None);
        assert!(!ConstraintStrategy::Horizontal.constrain_canvas(&mut vp, &groups, &modes));
    }
}
