//! Canvas-group positioning along the scroll axis.
//!
//! Groups flow along the *main axis* (x for horizontal scrolling, y for
//! vertical) and are centered on the *cross axis* at 0. Within a group,
//! spread members stack along the *stacking axis*: x normally, y when the
//! layout is rotated sideways.
//!
//! ```text
//!   LTR, horizontal, one page, margin m:
//!
//!        ┌────┐ m ┌────┐ m ┌────┐
//!   ─────┼─0──┼───┼─1──┼───┼─2──┼────▶ x
//!        └────┘   └────┘   └────┘
//!   group 0 is centered on the origin
//!
//!   LTR, horizontal, two page:
//!
//!   ┌────┐ m ┌────┬────┐ m ┌────┬────┐
//!   │ 0  │   │ 1  │ 2  │   │ 3  │ 4  │
//!   └────┘   └────┴────┘   └────┴────┘
//!   ^ x = 0  spread members abut
//! ```
//!
//! In two-page layouts this realizes the per-canvas parity rule: an odd
//! canvas starts a new spread one margin after the previous group, and the
//! even canvas that follows abuts it with no gap.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::geometry::Rect;
use crate::model::{CanvasGroup, ScrollDirection, ViewerLayout, ViewingDirection};
use crate::rotation::Rotation;

/// Where the first canvas group sits on the main axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FirstGroupOrigin {
    /// Centered on 0: main-axis position is `-extent / 2`.
    Centered,
    /// Leading edge at 0.
    Zero,
}

/// Positions canvas groups relative to their predecessor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasGroupPositioner {
    pub scroll_direction: ScrollDirection,
    pub viewing_direction: ViewingDirection,
    pub rotation: Rotation,
    /// Gap between consecutive groups on the main axis.
    pub margin: f64,
    pub first_origin: FirstGroupOrigin,
}

impl CanvasGroupPositioner {
    /// Positioner for a layout. Unpaged manifests always lay out one page
    /// per group regardless of the requested layout.
    pub fn for_layout(
        layout: ViewerLayout,
        paged: bool,
        scroll_direction: ScrollDirection,
        viewing_direction: ViewingDirection,
        rotation: Rotation,
        margin: f64,
    ) -> Self {
        let first_origin = if layout == ViewerLayout::OnePage || !paged {
            FirstGroupOrigin::Centered
        } else {
            FirstGroupOrigin::Zero
        };
        Self {
            scroll_direction,
            viewing_direction,
            rotation,
            margin,
            first_origin,
        }
    }

    /// Position every group in order. Input rects are unpositioned (only
    /// their sizes matter); the result is in absolute coordinates.
    pub fn position_all(&self, groups: Vec<CanvasGroup>) -> Vec<CanvasGroup> {
        let mut placed: Vec<CanvasGroup> = Vec::with_capacity(groups.len());
        for group in groups {
            let previous = placed.last().map(|g| g.rect);
            placed.push(self.position(previous.as_ref(), group));
        }
        placed
    }

    /// Place `current` after `previous` (or as the first group when there
    /// is none) and lay out its members inside it.
    pub fn position(&self, previous: Option<&Rect>, mut current: CanvasGroup) -> CanvasGroup {
        let size = current.rect;
        let main = self.main_axis_position(previous, &size);
        let (x, y) = match self.scroll_direction {
            ScrollDirection::Horizontal => (main, -size.height / 2.0),
            ScrollDirection::Vertical => (-size.width / 2.0, main),
        };
        let rect = size.at(x, y);

        if self.viewing_direction == ViewingDirection::Rtl {
            current.tiles.reverse();
        }
        let sideways = self.rotation.swaps_axes();
        let mut stack = if sideways { rect.y } else { rect.x };
        for tile in &mut current.tiles {
            let (w, h) = (tile.rect.width, tile.rect.height);
            tile.rect = if sideways {
                let r = tile.rect.at(rect.x + (rect.width - w) / 2.0, stack);
                stack += h;
                r
            } else {
                let r = tile.rect.at(stack, rect.y + (rect.height - h) / 2.0);
                stack += w;
                r
            };
        }
        current.rect = rect;
        current
    }

    fn main_axis_position(&self, previous: Option<&Rect>, current: &Rect) -> f64 {
        let horizontal = self.scroll_direction == ScrollDirection::Horizontal;
        let extent = |r: &Rect| if horizontal { r.width } else { r.height };
        let pos = |r: &Rect| if horizontal { r.x } else { r.y };

        match previous {
            None => match self.first_origin {
                FirstGroupOrigin::Centered => -extent(current) / 2.0,
                FirstGroupOrigin::Zero => 0.0,
            },
            Some(prev) => match self.viewing_direction {
                ViewingDirection::Ltr => pos(prev) + extent(prev) + self.margin,
                ViewingDirection::Rtl => pos(prev) - extent(current) - self.margin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanvasSource, TileSourceAndRect};

    fn single(index: usize, w: f64, h: f64) -> CanvasGroup {
        let rect = Rect::new(0.0, 0.0, w, h);
        CanvasGroup {
            tiles: vec![TileSourceAndRect {
                canvas_index: index,
                source: CanvasSource::new(w as u32, h as u32),
                rect,
            }],
            rect,
        }
    }

    fn spread(first: usize, w: f64, h: f64) -> CanvasGroup {
        let mut a = single(first, w, h);
        let b = single(first + 1, w, h);
        a.tiles.extend(b.tiles);
        a.rect = Rect::new(0.0, 0.0, w * 2.0, h);
        a
    }

    fn positioner(
        layout: ViewerLayout,
        scroll: ScrollDirection,
        viewing: ViewingDirection,
        rotation: Rotation,
    ) -> CanvasGroupPositioner {
        CanvasGroupPositioner::for_layout(layout, true, scroll, viewing, rotation, 10.0)
    }

    // ── one page ──

    #[test]
    fn one_page_horizontal_ltr() {
        let p = positioner(
            ViewerLayout::OnePage,
            ScrollDirection::Horizontal,
            ViewingDirection::Ltr,
            Rotation::Deg0,
        );
        let placed = p.position_all((0..3).map(|i| single(i, 100.0, 200.0)).collect());
        let xs: Vec<f64> = placed.iter().map(|g| g.rect.x).collect();
        assert_eq!(xs, vec![-50.0, 60.0, 170.0]);
        for g in &placed {
            assert_eq!(g.rect.y, -100.0, "cross axis centered at 0");
            assert_eq!(g.tiles[0].rect, g.rect);
        }
        assert_eq!(placed[0].rect.center_x(), 0.0);
        assert_eq!(placed[1].rect.center_x(), 110.0);
    }

    #[test]
    fn one_page_horizontal_rtl_flows_left() {
        let p = positioner(
            ViewerLayout::OnePage,
            ScrollDirection::Horizontal,
            ViewingDirection::Rtl,
            Rotation::Deg0,
        );
        let placed = p.position_all((0..3).map(|i| single(i, 100.0, 200.0)).collect());
        let xs: Vec<f64> = placed.iter().map(|g| g.rect.x).collect();
        assert_eq!(xs, vec![-50.0, -160.0, -270.0]);
    }

    #[test]
    fn one_page_vertical_stacks_down() {
        let p = positioner(
            ViewerLayout::OnePage,
            ScrollDirection::Vertical,
            ViewingDirection::Ltr,
            Rotation::Deg0,
        );
        let placed = p.position_all((0..2).map(|i| single(i, 100.0, 200.0)).collect());
        assert_eq!(placed[0].rect, Rect::new(-50.0, -100.0, 100.0, 200.0));
        assert_eq!(placed[1].rect, Rect::new(-50.0, 110.0, 100.0, 200.0));
    }

    #[test]
    fn unpaged_manifest_centers_first_group() {
        let p = CanvasGroupPositioner::for_layout(
            ViewerLayout::TwoPage,
            false,
            ScrollDirection::Horizontal,
            ViewingDirection::Ltr,
            Rotation::Deg0,
            10.0,
        );
        assert_eq!(p.first_origin, FirstGroupOrigin::Centered);
    }

    // ── two page ──

    #[test]
    fn two_page_spreads_abut_and_groups_keep_margin() {
        let p = positioner(
            ViewerLayout::TwoPage,
            ScrollDirection::Horizontal,
            ViewingDirection::Ltr,
            Rotation::Deg0,
        );
        let placed = p.position_all(vec![
            single(0, 100.0, 200.0),
            spread(1, 100.0, 200.0),
            spread(3, 100.0, 200.0),
        ]);
        assert_eq!(placed[0].rect.x, 0.0, "cover starts at origin");
        let canvas_x: Vec<f64> = placed
            .iter()
            .flat_map(|g| g.tiles.iter().map(|t| t.rect.x))
            .collect();
        // cover | m | 1 2 | m | 3 4
        assert_eq!(canvas_x, vec![0.0, 110.0, 210.0, 320.0, 420.0]);
    }

    #[test]
    fn two_page_rtl_puts_first_page_on_the_right() {
        let p = positioner(
            ViewerLayout::TwoPage,
            ScrollDirection::Horizontal,
            ViewingDirection::Rtl,
            Rotation::Deg0,
        );
        let placed = p.position_all(vec![single(0, 100.0, 200.0), spread(1, 100.0, 200.0)]);
        assert_eq!(placed[1].rect.x, -210.0);
        let right = placed[1].tiles.iter().max_by(|a, b| a.rect.x.total_cmp(&b.rect.x));
        assert_eq!(right.map(|t| t.canvas_index), Some(1));
    }

    #[test]
    fn sideways_spread_stacks_vertically() {
        let p = positioner(
            ViewerLayout::TwoPage,
            ScrollDirection::Horizontal,
            ViewingDirection::Ltr,
            Rotation::Deg90,
        );
        // After a quarter turn each 100×200 canvas is 200 wide, 100 tall,
        // and the spread is 200 × 200.
        let mut g = spread(1, 200.0, 100.0);
        g.rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let placed = p.position(None, g);
        assert_eq!(placed.rect, Rect::new(0.0, -100.0, 200.0, 200.0));
        assert_eq!(placed.tiles[0].rect, Rect::new(0.0, -100.0, 200.0, 100.0));
        assert_eq!(placed.tiles[1].rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn members_centered_on_cross_axis() {
        let p = positioner(
            ViewerLayout::TwoPage,
            ScrollDirection::Horizontal,
            ViewingDirection::Ltr,
            Rotation::Deg0,
        );
        let mut g = single(1, 100.0, 200.0);
        g.tiles.extend(single(2, 100.0, 100.0).tiles);
        g.rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let placed = p.position(None, g);
        assert_eq!(placed.tiles[1].rect, Rect::new(100.0, -50.0, 100.0, 100.0));
    }
}
