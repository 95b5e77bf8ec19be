//! Viewer configuration and tunables.
//!
//! [`ViewerConfig`] holds the options a host application chooses;
//! [`ViewerOptions`] holds the interaction constants (margins, thresholds,
//! zoom factors). Both implement `Default` with the values the viewer ships
//! with, and with the `serde` feature both deserialize from partial
//! documents.

use crate::canvas_rect::PHYSICAL_SCALE_REFERENCE;
use crate::error::{Error, Result};
use crate::model::{ScrollDirection, ViewerLayout, ViewerMode, ViewingDirection};

/// Host-facing viewer options.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ViewerConfig {
    /// Lay canvases out by pixel size even when the manifest carries a
    /// physical scale.
    pub ignore_physical_scale: bool,
    /// Keep the zoom level when turning pages while zoomed in.
    pub preserve_zoom_on_canvas_group_change: bool,
    /// Pan to the top of a new group instead of keeping the viewport's
    /// vertical position.
    pub start_on_top_on_canvas_group_change: bool,
    pub init_viewer_layout: ViewerLayout,
    pub init_scroll_direction: ScrollDirection,
    pub init_viewing_direction: ViewingDirection,
    pub init_viewer_mode: ViewerMode,
    pub options: ViewerOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ignore_physical_scale: false,
            preserve_zoom_on_canvas_group_change: false,
            start_on_top_on_canvas_group_change: false,
            init_viewer_layout: ViewerLayout::TwoPage,
            init_scroll_direction: ScrollDirection::Horizontal,
            init_viewing_direction: ViewingDirection::Ltr,
            init_viewer_mode: ViewerMode::Page,
            options: ViewerOptions::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_ignore_physical_scale(mut self, ignore: bool) -> Self {
        self.ignore_physical_scale = ignore;
        self
    }

    pub fn with_preserve_zoom_on_canvas_group_change(mut self, preserve: bool) -> Self {
        self.preserve_zoom_on_canvas_group_change = preserve;
        self
    }

    pub fn with_start_on_top_on_canvas_group_change(mut self, start_on_top: bool) -> Self {
        self.start_on_top_on_canvas_group_change = start_on_top;
        self
    }

    pub fn with_layout(mut self, layout: ViewerLayout) -> Self {
        self.init_viewer_layout = layout;
        self
    }

    pub fn with_scroll_direction(mut self, direction: ScrollDirection) -> Self {
        self.init_scroll_direction = direction;
        self
    }

    pub fn with_viewing_direction(mut self, direction: ViewingDirection) -> Self {
        self.init_viewing_direction = direction;
        self
    }

    pub fn with_viewer_mode(mut self, mode: ViewerMode) -> Self {
        self.init_viewer_mode = mode;
        self
    }

    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = options;
        self
    }

    /// Check every tunable. The initial mode must be one a user can land
    /// in (not [`ViewerMode::Navigator`]).
    pub fn validate(&self) -> Result<()> {
        if self.init_viewer_mode == ViewerMode::Navigator {
            return Err(Error::InvalidConfig {
                field: "initViewerMode",
                reason: "navigator is not an interactive mode",
            });
        }
        self.options.validate()
    }
}

/// Interaction constants.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ViewerOptions {
    /// Gap between canvas groups, in viewport units.
    pub canvas_group_margin: f64,
    /// Extra distance one axis must dominate by before a zoomed drag
    /// counts as a swipe along it.
    pub swipe_direction_threshold: f64,
    /// Drag speed at which page mode turns a page.
    pub page_turn_speed_threshold: f64,
    /// Edge overshoots needed before a zoomed drag turns the page.
    pub drag_end_hit_threshold: u32,
    /// Step factor for zoom in/out and wheel zoom.
    pub zoom_factor: f64,
    pub dbl_click_zoom_factor: f64,
    /// Minimum change in pinch distance, in pixels, that counts as a pinch.
    pub pinch_zoom_threshold: f64,
    /// Renderer animation time in milliseconds.
    pub animation_time_ms: u32,
    /// Share of the container width the dashboard uses, one-page layout.
    pub dashboard_one_page_factor: f64,
    /// Share of the container width the dashboard uses, two-page layout.
    pub dashboard_two_page_factor: f64,
    pub header_padding: f64,
    pub footer_padding: f64,
    /// Divisor applied to wheel deltas when panning a zoomed page.
    pub scroll_pan_factor: f64,
    /// Resolution a canvas's physical scale is multiplied by to get its
    /// pixel scale factor.
    pub physical_scale_reference: f64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            canvas_group_margin: Self::DEFAULT_CANVAS_GROUP_MARGIN,
            swipe_direction_threshold: 70.0,
            page_turn_speed_threshold: 200.0,
            drag_end_hit_threshold: 2,
            zoom_factor: 1.15,
            dbl_click_zoom_factor: 2.7,
            pinch_zoom_threshold: 3.0,
            animation_time_ms: 600,
            dashboard_one_page_factor: 0.85,
            dashboard_two_page_factor: 0.66,
            header_padding: 55.0,
            footer_padding: 55.0,
            scroll_pan_factor: 10.0,
            physical_scale_reference: PHYSICAL_SCALE_REFERENCE,
        }
    }
}

impl ViewerOptions {
    pub const DEFAULT_CANVAS_GROUP_MARGIN: f64 = 80.0;

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("zoomFactor", self.zoom_factor),
            ("dblClickZoomFactor", self.dbl_click_zoom_factor),
            ("dashboardOnePageFactor", self.dashboard_one_page_factor),
            ("dashboardTwoPageFactor", self.dashboard_two_page_factor),
            ("scrollPanFactor", self.scroll_pan_factor),
            ("physicalScaleReference", self.physical_scale_reference),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }
        let non_negative = [
            ("canvasGroupMargin", self.canvas_group_margin),
            ("swipeDirectionThreshold", self.swipe_direction_threshold),
            ("pageTurnSpeedThreshold", self.page_turn_speed_threshold),
            ("pinchZoomThreshold", self.pinch_zoom_threshold),
            ("headerPadding", self.header_padding),
            ("footerPadding", self.footer_padding),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if self.dashboard_one_page_factor > 1.0 || self.dashboard_two_page_factor > 1.0 {
            return Err(Error::InvalidConfig {
                field: "dashboardFactor",
                reason: "dashboard cannot be wider than its container",
            });
        }
        if self.drag_end_hit_threshold == 0 {
            return Err(Error::InvalidConfig {
                field: "dragEndHitThreshold",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Dashboard width factor for `layout`.
    pub fn dashboard_factor(&self, layout: ViewerLayout) -> f64 {
        match layout {
            ViewerLayout::OnePage => self.dashboard_one_page_factor,
            ViewerLayout::TwoPage => self.dashboard_two_page_factor,
        }
    }
}
