//! Home, fit-to and step zoom.
//!
//! Zoom levels are rounded to five decimals so that repeated fits land on
//! the same value instead of drifting.

use num_traits::Float;

use crate::canvas_groups::CanvasGroups;
use crate::config::ViewerOptions;
use crate::geometry::{Point, Rect, shorten_decimals};
use crate::mode::{ModeChanges, ModeService};
use crate::model::{ViewerLayout, ViewerMode};
use crate::viewport::Viewport;

const ZOOM_DECIMALS: i32 = 5;

/// Zoom decisions over a borrowed viewer state.
pub struct ZoomStrategy<'a, V: Viewport + ?Sized> {
    pub viewport: &'a mut V,
    pub groups: &'a CanvasGroups,
    pub modes: &'a mut ModeService,
    pub options: &'a ViewerOptions,
    pub layout: ViewerLayout,
}

impl<'a, V: Viewport + ?Sized> ZoomStrategy<'a, V> {
    /// Current zoom, rounded.
    pub fn zoom(&self) -> f64 {
        shorten_decimals(self.viewport.zoom(), ZOOM_DECIMALS)
    }

    pub fn max_zoom(&self) -> f64 {
        shorten_decimals(self.viewport.max_zoom(), ZOOM_DECIMALS)
    }

    /// The home level of `mode` becomes the minimum zoom.
    pub fn set_min_zoom(&mut self, mode: ViewerMode) {
        let level = self.home_zoom_level(mode);
        self.viewport.set_min_zoom(level);
    }

    /// Zoom level at which the current group fits entirely in view.
    ///
    /// Fits by height unless the group would then be wider than the
    /// viewport, in which case it fits by width. The dashboard fits into a
    /// shrunken viewport so neighbouring groups stay visible.
    pub fn home_zoom_level(&self, mode: ViewerMode) -> f64 {
        if self.groups.is_empty() {
            return 1.0;
        }
        let group = self.groups.current_group_rect();
        let bounds = if mode == ViewerMode::Dashboard {
            self.dashboard_viewport_bounds()
        } else {
            self.viewport.bounds()
        };
        self.fitted_zoom_level(&bounds, &group)
    }

    pub fn fit_to_width_zoom_level(&self, viewport_width: f64, group_width: f64) -> f64 {
        shorten_decimals(viewport_width / group_width * self.viewport.zoom(), ZOOM_DECIMALS)
    }

    pub fn fit_to_height_zoom_level(&self, viewport_height: f64, group_height: f64) -> f64 {
        shorten_decimals(viewport_height / group_height * self.viewport.zoom(), ZOOM_DECIMALS)
    }

    /// Zoom to the home level; a zoomed page drops back to page mode.
    pub fn go_to_home_zoom(&mut self) -> Option<ModeChanges> {
        let home = self.home_zoom_level(self.modes.mode());
        self.zoom_to(home, None);
        if self.modes.is_page_zoomed() {
            self.modes.set_mode(ViewerMode::Page)
        } else {
            None
        }
    }

    /// Zoom to `level`. A level of 0 means "unknown" and is skipped.
    pub fn zoom_to(&mut self, level: f64, position: Option<Point>) {
        if level != 0.0 {
            self.viewport.zoom_to(level, position);
        }
    }

    /// Zoom in by `factor` (default: the configured step) around a pixel
    /// position, entering page-zoomed mode.
    pub fn zoom_in(&mut self, factor: Option<f64>, position: Option<Point>) -> Option<ModeChanges> {
        let factor = factor.unwrap_or(self.options.zoom_factor);
        let anchor = self.anchor(position);
        let change = if self.modes.is_page_zoomed() {
            None
        } else {
            self.modes.set_mode(ViewerMode::PageZoomed)
        };
        self.zoom_by(factor, anchor);
        change
    }

    /// Zoom out by `factor` (default: one inverse step). When the whole
    /// group already fits, leaves page-zoomed mode instead of zooming.
    pub fn zoom_out(&mut self, factor: Option<f64>, position: Option<Point>) -> Option<ModeChanges> {
        let factor = factor.unwrap_or(1.0 / self.options.zoom_factor);
        let anchor = self.anchor(position);
        if self.is_viewport_larger_than_canvas_group() && self.modes.is_page_zoomed() {
            self.modes.set_mode(ViewerMode::Page)
        } else {
            self.zoom_by(factor, anchor);
            None
        }
    }

    pub fn fit_to_width(&mut self) -> Option<ModeChanges> {
        let bounds = self.viewport.bounds();
        let group = self.groups.current_group_rect();
        let level = self.fit_to_width_zoom_level(bounds.width, group.width);
        self.fit_to_level(level)
    }

    pub fn fit_to_height(&mut self) -> Option<ModeChanges> {
        let bounds = self.viewport.bounds();
        let group = self.groups.current_group_rect();
        let level = self.fit_to_height_zoom_level(bounds.height, group.height);
        self.fit_to_level(level)
    }

    /// Whether the viewport covers the current group on at least one axis,
    /// compared in whole units.
    pub fn is_viewport_larger_than_canvas_group(&self) -> bool {
        let group = self.groups.current_group_rect();
        let bounds = self.viewport.bounds();
        Float::round(bounds.height) >= Float::round(group.height)
            || Float::round(bounds.width) >= Float::round(group.width)
    }

    fn fit_to_level(&mut self, level: f64) -> Option<ModeChanges> {
        let home = self.home_zoom_level(self.modes.mode());
        let change = self.modes.set_viewer_mode_by_zoom_level(level, home);
        self.set_min_zoom(self.modes.mode());
        self.zoom_to(level, None);
        change
    }

    fn fitted_zoom_level(&self, bounds: &Rect, group: &Rect) -> f64 {
        let ratio = bounds.height / group.height;
        if ratio * group.width <= bounds.width {
            self.fit_to_height_zoom_level(bounds.height, group.height)
        } else {
            self.fit_to_width_zoom_level(bounds.width, group.width)
        }
    }

    fn dashboard_viewport_bounds(&self) -> Rect {
        let container = self.viewport.container_size();
        let height = container.height - self.options.header_padding - self.options.footer_padding;
        let width = container.width * self.options.dashboard_factor(self.layout);
        let size = self.viewport.delta_points_from_pixels(Point::new(width, height));
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    /// Pixel position to viewport coordinates, kept inside the current group.
    fn anchor(&self, position: Option<Point>) -> Option<Point> {
        let point = self.viewport.point_from_pixel(position?);
        Some(self.groups.current_group_rect().clamp_point(point))
    }

    fn zoom_by(&mut self, factor: f64, anchor: Option<Point>) {
        let factor = constrain_zoom_factor(factor, self.viewport.zoom(), self.viewport.min_zoom(), self.max_zoom());
        self.viewport.zoom_by(factor, anchor);
    }
}

/// Shrink `factor` so `current * factor` stays within `[min, max]`.
pub fn constrain_zoom_factor(factor: f64, current: f64, min: f64, max: f64) -> f64 {
    let target = current * factor;
    if max > 0.0 && target > max {
        tracing::trace!(factor, current, max, "zoom clamped to max");
        max / current
    } else if min > 0.0 && target < min {
        tracing::trace!(factor, current, min, "zoom clamped to min");
        min / current
    } else {
        factor
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grouping::{LayoutParams, layout_canvases};
    use crate::model::CanvasSource;
    use crate::viewport::{ContainerSize, TiledImage};

    #[cfg(not(feature = "std"))]
    use alloc::vec::Vec;

    /// Viewport whose bounds scale with zoom: at zoom 1 it shows
    /// `width_at_1 × height_at_1` units around `center`.
    #[derive(Debug)]
    pub(crate) struct FakeViewport {
        pub center: Point,
        pub zoom: f64,
        pub min_zoom: f64,
        pub max_zoom: f64,
        pub width_at_1: f64,
        pub height_at_1: f64,
        pub container: ContainerSize,
        pub pans: Vec<(Point, bool)>,
        pub images: Vec<TiledImage>,
        pub rotation_supported: bool,
        pub pan_constraints: (bool, bool),
    }

    impl FakeViewport {
        pub(crate) fn new(width_at_1: f64, height_at_1: f64) -> Self {
            Self {
                center: Point::ORIGIN,
                zoom: 1.0,
                min_zoom: 0.0,
                max_zoom: 10.0,
                width_at_1,
                height_at_1,
                container: ContainerSize {
                    width: width_at_1,
                    height: height_at_1,
                },
                pans: Vec::new(),
                images: Vec::new(),
                rotation_supported: true,
                pan_constraints: (true, true),
            }
        }
    }

    impl Viewport for FakeViewport {
        fn bounds(&self) -> Rect {
            let w = self.width_at_1 / self.zoom;
            let h = self.height_at_1 / self.zoom;
            Rect::new(self.center.x - w / 2.0, self.center.y - h / 2.0, w, h)
        }
        fn zoom(&self) -> f64 {
            self.zoom
        }
        fn max_zoom(&self) -> f64 {
            self.max_zoom
        }
        fn min_zoom(&self) -> f64 {
            self.min_zoom
        }
        fn set_min_zoom(&mut self, level: f64) {
            self.min_zoom = level;
        }
        fn pan_to(&mut self, center: Point, immediately: bool) {
            self.center = center;
            self.pans.push((center, immediately));
        }
        fn pan_by(&mut self, delta: Point, _immediately: bool) {
            self.center = Point::new(self.center.x + delta.x, self.center.y + delta.y);
        }
        fn zoom_to(&mut self, level: f64, _anchor: Option<Point>) {
            self.zoom = level;
        }
        fn zoom_by(&mut self, factor: f64, _anchor: Option<Point>) {
            self.zoom *= factor;
        }
        fn point_from_pixel(&self, pixel: Point) -> Point {
            let b = self.bounds();
            Point::new(b.x + pixel.x / self.zoom, b.y + pixel.y / self.zoom)
        }
        fn delta_points_from_pixels(&self, pixels: Point) -> Point {
            Point::new(pixels.x / self.zoom, pixels.y / self.zoom)
        }
        fn container_size(&self) -> ContainerSize {
            self.container
        }
        fn supports_rotation(&self) -> bool {
            self.rotation_supported
        }
        fn add_tiled_image(&mut self, image: TiledImage) {
            self.images.push(image);
        }
        fn clear_tiled_images(&mut self) {
            self.images.clear();
        }
        fn set_pan_constraints(&mut self, horizontal: bool, vertical: bool) {
            self.pan_constraints = (horizontal, vertical);
        }
    }

    fn one_group(w: u32, h: u32) -> CanvasGroups {
        layout_canvases(&[CanvasSource::new(w, h)], &LayoutParams::default())
    }

    fn strategy<'a>(
        viewport: &'a mut FakeViewport,
        groups: &'a CanvasGroups,
        modes: &'a mut ModeService,
        options: &'a ViewerOptions,
    ) -> ZoomStrategy<'a, FakeViewport> {
        ZoomStrategy {
            viewport,
            groups,
            modes,
            options,
            layout: ViewerLayout::OnePage,
        }
    }

    // ── fit levels ──

    #[test]
    fn fit_levels_scale_with_current_zoom() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        vp.zoom = 2.0;
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        assert_eq!(z.fit_to_width_zoom_level(500.0, 100.0), 10.0);
        assert_eq!(z.fit_to_height_zoom_level(250.0, 200.0), 2.5);
        assert_eq!(z.fit_to_width_zoom_level(1.0, 3.0), 0.66667);
    }

    #[test]
    fn home_fits_by_height_when_possible() {
        // viewport 1000×500, group 100×200: height-fit gives 250 wide, fits.
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        assert_eq!(z.home_zoom_level(ViewerMode::Page), 2.5);
    }

    #[test]
    fn home_falls_back_to_width_for_wide_groups() {
        // group 1000×100 in a 500×500 viewport: height-fit would be 5000 wide.
        let mut vp = FakeViewport::new(500.0, 500.0);
        let groups = one_group(1000, 100);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        assert_eq!(z.home_zoom_level(ViewerMode::Page), 0.5);
    }

    #[test]
    fn dashboard_home_uses_shrunken_viewport() {
        let mut vp = FakeViewport::new(1000.0, 610.0);
        let groups = one_group(100, 100);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        // 610 - 55 - 55 = 500 high, 850 wide: height-fit wins at 5.0
        assert_eq!(z.home_zoom_level(ViewerMode::Dashboard), 5.0);
        assert_eq!(z.home_zoom_level(ViewerMode::Page), 6.1);
    }

    #[test]
    fn empty_layout_home_is_one() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = CanvasGroups::default();
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        assert_eq!(z.home_zoom_level(ViewerMode::Page), 1.0);
    }

    // ── step zoom ──

    #[test]
    fn zoom_in_enters_zoomed_mode() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        let change = z.zoom_in(None, None);
        assert_eq!(change.map(|c| c.current), Some(ViewerMode::PageZoomed));
        assert_eq!(shorten_decimals(vp.zoom, 5), 1.15);
    }

    #[test]
    fn zoom_in_clamps_to_max() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        vp.zoom = 9.0;
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        z.zoom_in(Some(2.0), None);
        assert_eq!(shorten_decimals(vp.zoom, 5), 10.0);
    }

    #[test]
    fn zoom_out_when_group_fits_leaves_zoomed_mode() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::new(ViewerMode::PageZoomed);
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        let change = z.zoom_out(None, None);
        assert_eq!(change.map(|c| c.current), Some(ViewerMode::Page));
        assert_eq!(vp.zoom, 1.0, "no zoom applied");
    }

    #[test]
    fn zoom_out_clamps_to_min() {
        let mut vp = FakeViewport::new(10.0, 10.0);
        vp.zoom = 1.0;
        vp.min_zoom = 0.9;
        let groups = one_group(100, 200);
        let mut modes = ModeService::new(ViewerMode::PageZoomed);
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        z.zoom_out(Some(0.5), None);
        assert_eq!(vp.zoom, 0.9);
    }

    #[test]
    fn zoom_to_zero_is_skipped() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        z.zoom_to(0.0, None);
        assert_eq!(vp.zoom, 1.0);
    }

    #[test]
    fn anchor_is_clamped_into_group() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let z = strategy(&mut vp, &groups, &mut modes, &options);
        // pixel (0,0) is the viewport's top-left, far outside the group
        let anchor = z.anchor(Some(Point::ORIGIN));
        assert_eq!(anchor, Some(Point::new(-50.0, -100.0)));
    }

    // ── fit-to ──

    #[test]
    fn repeated_fits_are_stable() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(300, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        z.fit_to_width();
        let width_level = z.zoom();
        z.fit_to_height();
        let height_level = z.zoom();
        z.fit_to_width();
        assert_eq!(z.zoom(), width_level);
        z.fit_to_height();
        assert_eq!(z.zoom(), height_level);
        assert_eq!(width_level, 3.33333);
        assert_eq!(height_level, 2.5);
    }

    #[test]
    fn fit_to_width_above_home_is_zoomed() {
        let mut vp = FakeViewport::new(1000.0, 500.0);
        let groups = one_group(100, 200);
        let mut modes = ModeService::default();
        let options = ViewerOptions::default();
        let mut z = strategy(&mut vp, &groups, &mut modes, &options);
        let change = z.fit_to_width();
        assert_eq!(change.map(|c| c.current), Some(ViewerMode::PageZoomed));
        assert_eq!(vp.zoom, 10.0);
    }

    #[test]
    fn constrain_factor() {
        assert_eq!(constrain_zoom_factor(2.0, 1.0, 0.5, 4.0), 2.0);
        assert_eq!(constrain_zoom_factor(8.0, 1.0, 0.5, 4.0), 4.0);
        assert_eq!(constrain_zoom_factor(0.25, 1.0, 0.5, 4.0), 0.5);
    }
}
