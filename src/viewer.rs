//! The viewer: canvas layout, navigation and gestures over one [`Viewport`].
//!
//! [`Viewer`] owns every piece of navigation state (the canvas-group
//! registry, mode, scroll and viewing direction, rotation, swipe debounce)
//! and is driven by two kinds of calls:
//!
//! - **Commands** from the UI: [`go_to_canvas_group`](Viewer::go_to_canvas_group),
//!   [`home`](Viewer::home), [`zoom_in`](Viewer::zoom_in), [`rotate`](Viewer::rotate), ...
//! - **Gesture and renderer callbacks**: [`on_press`](Viewer::on_press),
//!   [`on_drag_end`](Viewer::on_drag_end), [`on_pinch`](Viewer::on_pinch),
//!   [`on_animation_finish`](Viewer::on_animation_finish), ...
//!
//! Each call runs to completion: read state, decide, write the registry,
//! issue viewport commands. Observable changes are queued as
//! [`ViewerEvent`]s and collected with [`drain_events`](Viewer::drain_events).
//!
//! One transition needs a delay. Turning the page while zoomed in (without
//! preserved zoom) centers the old page, zooms out to home and only then
//! centers the new page. The last step is queued as a [`Deferred`]; the
//! host runs it with [`run_deferred`](Viewer::run_deferred) once its delay
//! has passed.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_traits::Float;

use crate::canvas_groups::CanvasGroups;
use crate::config::ViewerConfig;
use crate::constraint::ConstraintStrategy;
use crate::error::{Error, Result};
use crate::geometry::{Point, shorten_decimals};
use crate::go_to::GoToCanvasGroupStrategy;
use crate::grouping::{LayoutParams, layout_canvases};
use crate::mode::{ModeChanges, ModeService};
use crate::model::{CanvasSource, Direction, FitTo, ScrollDirection, ViewerLayout, ViewerMode, ViewingDirection};
use crate::next_group::{NextCanvasGroupCriteria, NextCanvasGroupStrategy};
use crate::rotation::Rotation;
use crate::scroll_direction::ScrollDirectionService;
use crate::swipe::{SwipeDragEndCounter, side_if_panning_past_end_of_canvas_group, swipe_direction};
use crate::viewport::{TiledImage, Viewport};
use crate::zoom::ZoomStrategy;

/// Something observable changed. Each kind is emitted only on an actual
/// change.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// The renderer opened and the first group is shown.
    Ready,
    CanvasGroupIndexChanged(usize),
    ZoomChanged(f64),
    RotationChanged(Rotation),
    ModeChanged(ModeChanges),
    /// A user-facing message; the requested action did nothing.
    Notice(Error),
}

/// Work the host must run later with [`Viewer::run_deferred`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Center the current group once the zoom-out animation has finished.
    CenterCurrentCanvas { delay_ms: u32 },
}

/// Drag callback payload. `position` is in container pixels, `speed` in
/// pixels per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent {
    pub position: Point,
    pub speed: f64,
}

/// Pinch callback payload. Distances are between the two touch points, in
/// pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchEvent {
    pub distance: f64,
    pub last_distance: f64,
    pub center: Point,
    /// Id of the first touch point; the platform hands out increasing ids.
    pub gesture_id: u64,
}

/// Wheel callback payload. Positive `scroll` is away from the user.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub position: Point,
    pub ctrl_key: bool,
}

/// Click callback payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
    /// Canvas under the pointer, if the click hit one.
    pub canvas_index: Option<usize>,
}

/// Pinch bookkeeping between callbacks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PinchStatus {
    /// A pinch happened since the last press; suppresses the drag-end swipe.
    pub active: bool,
    /// Pinching in stopped at page mode instead of continuing to the dashboard.
    pub should_stop: bool,
    pub previous_gesture_id: Option<u64>,
}

/// Canvas viewer over a [`Viewport`].
#[derive(Debug)]
pub struct Viewer<V: Viewport> {
    viewport: V,
    config: ViewerConfig,
    sources: Vec<CanvasSource>,
    paged: bool,
    groups: CanvasGroups,
    modes: ModeService,
    scroll: ScrollDirectionService,
    viewing_direction: ViewingDirection,
    layout: ViewerLayout,
    rotation: Rotation,
    previous_index: usize,
    /// Group nearest the viewport center, as last observed.
    center_index: usize,
    counter: SwipeDragEndCounter,
    pinch: PinchStatus,
    drag_start: Option<Point>,
    dragging: bool,
    ready: bool,
    reacting_to_mode_change: bool,
    last_index: Option<usize>,
    last_zoom: Option<f64>,
    deferred: Option<Deferred>,
    events: Vec<ViewerEvent>,
}

impl<V: Viewport> Viewer<V> {
    pub fn new(viewport: V, config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport,
            sources: Vec::new(),
            paged: false,
            groups: CanvasGroups::default(),
            modes: ModeService::new(config.init_viewer_mode),
            scroll: ScrollDirectionService::new(config.init_scroll_direction),
            viewing_direction: config.init_viewing_direction,
            layout: config.init_viewer_layout,
            rotation: Rotation::Deg0,
            previous_index: 0,
            center_index: 0,
            counter: SwipeDragEndCounter::with_threshold(config.options.drag_end_hit_threshold),
            pinch: PinchStatus::default(),
            drag_start: None,
            dragging: false,
            ready: false,
            reacting_to_mode_change: false,
            last_index: None,
            last_zoom: None,
            deferred: None,
            events: Vec::new(),
            config,
        })
    }

    // ---- State ----

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn canvas_groups(&self) -> &CanvasGroups {
        &self.groups
    }

    pub fn mode(&self) -> ViewerMode {
        self.modes.mode()
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll.scroll_direction()
    }

    pub fn viewing_direction(&self) -> ViewingDirection {
        self.viewing_direction
    }

    /// Requested layout. Unpaged manifests are still laid out one page per
    /// group; see [`CanvasGroups::layout`].
    pub fn layout(&self) -> ViewerLayout {
        self.layout
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current zoom, rounded to five decimals.
    pub fn zoom(&self) -> f64 {
        shorten_decimals(self.viewport.zoom(), 5)
    }

    pub fn current_canvas_group_index(&self) -> usize {
        self.groups.current_index()
    }

    pub fn pending_deferred(&self) -> Option<Deferred> {
        self.deferred
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        core::mem::take(&mut self.events)
    }

    // ---- Layout ----

    /// Replace the canvases and lay them out. `paged` says whether the
    /// manifest has spreads.
    pub fn set_canvases(&mut self, sources: Vec<CanvasSource>, paged: bool) {
        self.sources = sources;
        self.paged = paged;
        self.layout_pages();
    }

    /// Rebuild the layout from the current settings, staying on the same
    /// canvas.
    pub fn layout_pages(&mut self) {
        let canvas = self.groups.current_canvas_index();
        self.rebuild();
        if self.ready {
            self.go_to_canvas(canvas, false);
            self.home();
        }
        self.sync_events();
    }

    /// Register one tiled image per canvas with the renderer.
    pub fn add_tiled_images(&mut self) {
        let degrees = self.rotation.degrees();
        let mut tiles: Vec<_> = self.groups.groups().iter().flat_map(|g| g.tiles.iter().copied()).collect();
        tiles.sort_by_key(|t| t.canvas_index);
        for tile in tiles {
            self.viewport.add_tiled_image(TiledImage {
                index: tile.canvas_index,
                source: tile.source,
                fit_bounds: self.rotation.tiled_image_bounds(tile.rect),
                degrees,
            });
        }
    }

    pub fn set_scroll_direction(&mut self, direction: ScrollDirection) {
        if self.scroll.set_scroll_direction(direction) {
            self.layout_pages();
        }
    }

    pub fn set_viewing_direction(&mut self, direction: ViewingDirection) {
        if self.viewing_direction != direction {
            self.viewing_direction = direction;
            self.layout_pages();
        }
    }

    pub fn set_layout(&mut self, layout: ViewerLayout) {
        if self.layout != layout {
            self.layout = layout;
            self.layout_pages();
        }
    }

    /// Rotate the whole layout 90° clockwise.
    ///
    /// Fails with [`Error::RotationNotSupported`] (also queued as a
    /// [`ViewerEvent::Notice`]) when the renderer cannot rotate.
    pub fn rotate(&mut self) -> Result<Rotation> {
        if !self.viewport.supports_rotation() {
            self.events.push(ViewerEvent::Notice(Error::RotationNotSupported));
            return Err(Error::RotationNotSupported);
        }
        self.rotation = self.rotation.rotate_cw();
        tracing::debug!(degrees = self.rotation.degrees(), "rotated");
        self.events.push(ViewerEvent::RotationChanged(self.rotation));
        self.layout_pages();
        Ok(self.rotation)
    }

    /// Tear down the renderer state. A layout switch keeps the rotation
    /// and mode.
    pub fn destroy(&mut self, layout_switch: bool) {
        self.ready = false;
        self.viewport.clear_tiled_images();
        self.groups = CanvasGroups::default();
        self.previous_index = 0;
        self.center_index = 0;
        self.counter.reset();
        self.pinch = PinchStatus::default();
        self.drag_start = None;
        self.dragging = false;
        self.deferred = None;
        self.last_index = None;
        if !layout_switch {
            if self.rotation != Rotation::Deg0 {
                self.rotation = Rotation::Deg0;
                self.events.push(ViewerEvent::RotationChanged(self.rotation));
            }
            self.modes.reset();
        }
    }

    // ---- Navigation ----

    pub fn go_to_canvas_group(&mut self, index: usize, immediately: bool) {
        self.deferred = None;
        self.go_to(index as isize, immediately, false);
        self.sync_events();
    }

    /// Go to the group containing `canvas_index`; unknown canvases go to
    /// the first group.
    pub fn go_to_canvas(&mut self, canvas_index: usize, immediately: bool) {
        let index = self.groups.find_group_by_canvas_index(canvas_index).map_or(-1, |i| i as isize);
        self.deferred = None;
        self.go_to(index, immediately, false);
        self.sync_events();
    }

    pub fn go_to_next_canvas_group(&mut self) {
        let change = self.go_to_strategy().go_to_next_canvas_group();
        self.mode_changed(change);
        self.sync_events();
    }

    pub fn go_to_previous_canvas_group(&mut self) {
        let change = self.go_to_strategy().go_to_previous_canvas_group();
        self.mode_changed(change);
        self.sync_events();
    }

    /// Center the current group at its home zoom, dropping any fit-to.
    pub fn home(&mut self) {
        if !self.ready {
            return;
        }
        let mode = self.modes.mode();
        self.zoom_strategy().set_min_zoom(mode);
        self.go_to_strategy().center_current_canvas();
        self.groups.reset_fit_to();
        let change = self.zoom_strategy().go_to_home_zoom();
        self.mode_changed(change);
        self.sync_events();
    }

    pub fn zoom_in(&mut self, factor: Option<f64>, position: Option<Point>) {
        self.groups.reset_fit_to();
        let change = self.zoom_strategy().zoom_in(factor, position);
        self.mode_changed(change);
        self.sync_events();
    }

    pub fn zoom_out(&mut self, factor: Option<f64>, position: Option<Point>) {
        self.groups.reset_fit_to();
        let change = self.zoom_strategy().zoom_out(factor, position);
        self.mode_changed(change);
        self.sync_events();
    }

    /// Enable fit-to-width (no-op if already enabled).
    pub fn fit_to_width(&mut self) {
        if !self.groups.is_fit_to_width_enabled() {
            self.toggle_fit_to_width();
        }
    }

    /// Enable fit-to-height (no-op if already enabled).
    pub fn fit_to_height(&mut self) {
        if !self.groups.is_fit_to_height_enabled() {
            self.toggle_fit_to_height();
        }
    }

    pub fn toggle_fit_to_width(&mut self) -> FitTo {
        let fit = self.groups.toggle_fit_to_width();
        self.fit_to_changed(fit)
    }

    pub fn toggle_fit_to_height(&mut self) -> FitTo {
        let fit = self.groups.toggle_fit_to_height();
        self.fit_to_changed(fit)
    }

    pub fn toggle_mode(&mut self) {
        let change = self.modes.toggle_mode();
        self.mode_changed(change);
        self.sync_events();
    }

    pub fn set_viewer_mode(&mut self, mode: ViewerMode) {
        let change = self.modes.set_mode(mode);
        self.mode_changed(change);
        self.sync_events();
    }

    /// Pull the viewport back over the current group's cross axis.
    pub fn constrain_canvas(&mut self) -> bool {
        ConstraintStrategy::for_scroll_direction(self.scroll.scroll_direction()).constrain_canvas(
            &mut self.viewport,
            &self.groups,
            &self.modes,
        )
    }

    /// Run the pending deferred step, if any. Returns whether one ran.
    pub fn run_deferred(&mut self) -> bool {
        match self.deferred.take() {
            Some(Deferred::CenterCurrentCanvas { .. }) => {
                self.go_to_strategy().center_current_canvas();
                self.sync_events();
                true
            }
            None => false,
        }
    }

    // ---- Renderer callbacks ----

    /// The renderer opened: show the first group at home zoom.
    pub fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.events.push(ViewerEvent::Ready);
        self.home();
        let center = self.viewport.center();
        self.calculate_current_canvas_group(center);
        self.sync_events();
    }

    pub fn on_animation_finish(&mut self) {
        let center = self.viewport.center();
        self.calculate_current_canvas_group(center);
        self.sync_events();
    }

    /// The viewport panned. While scrolling vertically the current group
    /// follows the viewport unless a drag is in progress.
    pub fn on_pan(&mut self) {
        if !self.dragging && self.scroll.is_vertical() {
            let center = self.viewport.center();
            self.calculate_current_canvas_group(center);
            self.sync_events();
        }
    }

    /// The viewport zoomed. A user zoom around a reference point cancels
    /// fit-to.
    pub fn on_zoom(&mut self, user_initiated: bool) {
        if user_initiated {
            self.groups.reset_fit_to();
        }
        self.sync_events();
    }

    // ---- Gestures ----

    pub fn on_press(&mut self, position: Point) {
        self.pinch.active = false;
        self.drag_start = Some(position);
    }

    pub fn on_drag(&mut self) {
        self.dragging = true;
    }

    /// A drag ended. Horizontal scrolling decides whether the drag turns
    /// the page; vertical scrolling just tracks the group in view.
    pub fn on_drag_end(&mut self, event: DragEvent) {
        if self.dragging {
            if self.scroll.is_horizontal() {
                self.swipe_to_canvas_group(event);
            } else {
                let center = self.viewport.center();
                self.calculate_current_canvas_group(center);
            }
        }
        self.dragging = false;
        self.sync_events();
    }

    /// Ctrl+wheel zooms; otherwise the wheel pans a zoomed or fitted page
    /// and turns pages at home zoom.
    pub fn on_scroll(&mut self, event: ScrollEvent) {
        if event.ctrl_key {
            let factor = Float::powf(self.config.options.zoom_factor, event.scroll);
            if event.scroll > 0.0 {
                self.zoom_in_gesture(event.position, factor);
            } else if event.scroll < 0.0 {
                self.zoom_out_gesture(event.position, factor);
            }
        } else if self.modes.is_page_zoomed() || self.groups.is_fit_to_enabled() {
            let y = -event.scroll / self.zoom() / self.config.options.scroll_pan_factor;
            self.viewport.pan_by(Point::new(0.0, y), false);
        } else {
            let back = (event.scroll > 0.0) == (self.viewing_direction == ViewingDirection::Ltr);
            if back {
                self.go_to_previous_canvas_group();
            } else {
                self.go_to_next_canvas_group();
            }
        }
        self.sync_events();
    }

    /// Pinching out zooms in (leaving the dashboard first). Pinching in
    /// zooms out, stops once at page mode, and only a fresh pinch continues
    /// to the dashboard.
    pub fn on_pinch(&mut self, event: PinchEvent) {
        self.pinch.active = true;
        let threshold = self.config.options.pinch_zoom_threshold;
        let factor = event.distance / event.last_distance;
        if event.distance > event.last_distance + threshold {
            if self.modes.is_dashboard() {
                let change = self.modes.set_mode(ViewerMode::Page);
                self.mode_changed(change);
            } else {
                let anchor = self.drag_start.unwrap_or(event.center);
                self.zoom_in(Some(factor), Some(anchor));
            }
        } else if event.distance + threshold < event.last_distance {
            if self.modes.is_page_zoomed() {
                self.pinch.should_stop = true;
                self.zoom_out(Some(factor), Some(event.center));
            } else if self.modes.is_page() {
                let fresh = self.pinch.previous_gesture_id.and_then(|id| id.checked_add(2)) == Some(event.gesture_id);
                if !self.pinch.should_stop || fresh {
                    self.pinch.should_stop = false;
                    let change = self.modes.toggle_mode();
                    self.mode_changed(change);
                }
                self.pinch.previous_gesture_id = Some(event.gesture_id);
            }
        }
        self.sync_events();
    }

    /// Select the clicked group (or the one in view) and toggle between
    /// dashboard and page.
    pub fn on_click(&mut self, event: ClickEvent) {
        self.select_clicked_group(event.canvas_index);
        let change = self.modes.toggle_mode();
        self.mode_changed(change);
        self.sync_events();
    }

    /// In page mode, zoom in on the click. Otherwise return to page mode
    /// on the clicked group.
    pub fn on_double_click(&mut self, event: ClickEvent) {
        if self.modes.is_page() {
            let change = self.modes.set_mode(ViewerMode::PageZoomed);
            self.mode_changed(change);
            let factor = self.config.options.dbl_click_zoom_factor;
            self.zoom_in(Some(factor), Some(event.position));
        } else {
            self.select_clicked_group(event.canvas_index);
            let change = self.modes.set_mode(ViewerMode::Page);
            self.mode_changed(change);
        }
        self.sync_events();
    }

    // ---- Internals ----

    fn rebuild(&mut self) {
        let params = LayoutParams {
            layout: self.layout,
            paged: self.paged,
            scroll_direction: self.scroll.scroll_direction(),
            viewing_direction: self.viewing_direction,
            rotation: self.rotation,
            ignore_physical_scale: self.config.ignore_physical_scale,
            physical_scale_reference: self.config.options.physical_scale_reference,
            margin: self.config.options.canvas_group_margin,
        };
        self.groups = layout_canvases(&self.sources, &params);
        self.previous_index = 0;
        self.counter.reset();
        self.viewport.clear_tiled_images();
        self.add_tiled_images();
    }

    fn go_to(&mut self, index: isize, immediately: bool, pan_to_center: bool) {
        let change = self.go_to_strategy().go_to_canvas_group(index, immediately, pan_to_center);
        self.mode_changed(change);
    }

    fn swipe_to_canvas_group(&mut self, event: DragEvent) {
        if self.pinch.active {
            return;
        }
        let scroll_direction = self.scroll.scroll_direction();
        let zoomed = self.modes.is_page_zoomed();
        let start = self.drag_start.unwrap_or(event.position);
        let threshold = if zoomed {
            self.config.options.swipe_direction_threshold
        } else {
            0.0
        };
        let direction = swipe_direction(start, event.position, threshold);

        let mut end_hit_count_reached = false;
        if zoomed {
            let side = side_if_panning_past_end_of_canvas_group(
                &self.groups.current_group_rect(),
                &self.viewport.bounds(),
                scroll_direction,
            );
            self.counter.add_hit(side, Some(direction), scroll_direction);
            end_hit_count_reached = self.counter.hit_count_reached();
        }

        let current = self.groups.current_index();
        let center = self
            .groups
            .find_closest_index(Some(self.viewport.center()), scroll_direction)
            .unwrap_or(self.center_index);
        let strategy = match self.modes.mode() {
            ViewerMode::Page => NextCanvasGroupStrategy::Page {
                speed_threshold: self.config.options.page_turn_speed_threshold,
            },
            mode => NextCanvasGroupStrategy::for_mode(mode),
        };
        let criteria = NextCanvasGroupCriteria::new(direction, current as isize, self.viewing_direction, scroll_direction)
            .with_speed(event.speed)
            .with_center(center as isize)
            .with_end_hit_count_reached(end_hit_count_reached);
        let target = self.groups.constrain_to_range(strategy.calculate_next_canvas_group(&criteria));
        tracing::debug!(?direction, speed = event.speed, current, target, end_hit_count_reached, "swipe ended");

        let turns_page = end_hit_count_reached && matches!(direction, Direction::Left | Direction::Right);
        if self.modes.is_dashboard() || self.modes.is_page() {
            self.go_to(target as isize, false, false);
        } else if turns_page {
            if self.config.preserve_zoom_on_canvas_group_change || target == current {
                self.go_to(target as isize, false, false);
            } else {
                self.zoomed_page_turn(target);
            }
        }
    }

    /// Center the old page, zoom out to home, then (deferred) center the
    /// new one.
    fn zoomed_page_turn(&mut self, target: usize) {
        self.go_to_strategy().center_current_canvas();
        self.previous_index = self.groups.current_index();
        self.groups.set_current_index(target as isize);
        let was_reacting = core::mem::replace(&mut self.reacting_to_mode_change, true);
        let change = self.zoom_strategy().go_to_home_zoom();
        self.mode_changed(change);
        self.reacting_to_mode_change = was_reacting;
        self.deferred = Some(Deferred::CenterCurrentCanvas {
            delay_ms: self.config.options.animation_time_ms,
        });
    }

    fn select_clicked_group(&mut self, canvas_index: Option<usize>) {
        match canvas_index.and_then(|c| self.groups.find_group_by_canvas_index(c)) {
            Some(index) => self.groups.set_current_index(index as isize),
            None => {
                let center = self.viewport.center();
                self.calculate_current_canvas_group(center);
            }
        }
    }

    /// Track the group nearest `center`; it becomes current when it changes.
    fn calculate_current_canvas_group(&mut self, center: Point) {
        let Some(index) = self.groups.find_closest_index(Some(center), self.scroll.scroll_direction()) else {
            return;
        };
        if index == self.center_index && index == self.groups.current_index() {
            return;
        }
        self.center_index = index;
        self.groups.set_current_index(index as isize);
        if self.groups.is_fit_to_enabled() {
            self.update_fit_to(false);
        }
    }

    fn fit_to_changed(&mut self, fit: FitTo) -> FitTo {
        tracing::debug!(?fit, "fit-to changed");
        self.update_fit_to(fit == FitTo::None);
        self.sync_events();
        fit
    }

    fn update_fit_to(&mut self, initial_toggle: bool) {
        let change = match self.groups.fit_to() {
            FitTo::Width => self.zoom_strategy().fit_to_width(),
            FitTo::Height => self.zoom_strategy().fit_to_height(),
            FitTo::None => None,
        };
        self.mode_changed(change);
        if self.groups.is_fit_to_enabled() && !initial_toggle && self.scroll.is_horizontal() {
            self.go_to_strategy().adjust_position(false);
        }
        self.update_panning_constraints();
        self.constrain_canvas();
    }

    /// Report a transition and react to it. Transitions raised while
    /// reacting are reported and get their pan and min-zoom bounds
    /// updated, but are not reacted to again.
    fn mode_changed(&mut self, change: Option<ModeChanges>) {
        let Some(change) = change else {
            return;
        };
        self.events.push(ViewerEvent::ModeChanged(change));
        self.update_panning_constraints();
        if self.reacting_to_mode_change {
            self.zoom_strategy().set_min_zoom(change.current);
            return;
        }
        self.reacting_to_mode_change = true;
        match change.current {
            ViewerMode::Dashboard => {
                self.groups.reset_fit_to();
                self.show_current_group_at_home(ViewerMode::Dashboard);
            }
            ViewerMode::Page => self.show_current_group_at_home(ViewerMode::Page),
            ViewerMode::PageZoomed => self.zoom_strategy().set_min_zoom(ViewerMode::PageZoomed),
            ViewerMode::Navigator => {}
        }
        self.reacting_to_mode_change = false;
    }

    fn show_current_group_at_home(&mut self, mode: ViewerMode) {
        if !self.groups.is_current_valid() {
            return;
        }
        let index = self.groups.current_index();
        self.go_to(index as isize, false, false);
        self.zoom_strategy().set_min_zoom(mode);
        let change = self.zoom_strategy().go_to_home_zoom();
        self.mode_changed(change);
    }

    fn update_panning_constraints(&mut self) {
        let page = self.modes.is_page();
        let (horizontal, vertical) = match self.scroll.scroll_direction() {
            ScrollDirection::Horizontal => (true, !(page || self.groups.is_fit_to_height_enabled())),
            ScrollDirection::Vertical => (!(page || self.groups.is_fit_to_width_enabled()), true),
        };
        self.viewport.set_pan_constraints(horizontal, vertical);
    }

    /// Queue index and zoom changes, reacting to a new index the way a page
    /// turn does: reset the swipe debounce and, at page or dashboard level,
    /// return to home zoom.
    fn sync_events(&mut self) {
        if !self.groups.is_empty() {
            let index = self.groups.current_index();
            if self.last_index != Some(index) {
                self.last_index = Some(index);
                self.counter.reset();
                self.events.push(ViewerEvent::CanvasGroupIndexChanged(index));
                if self.ready && (self.modes.is_page() || self.modes.is_dashboard()) && !self.groups.is_fit_to_enabled() {
                    let change = self.zoom_strategy().go_to_home_zoom();
                    self.mode_changed(change);
                }
            }
        }
        let zoom = self.zoom();
        if self.last_zoom != Some(zoom) {
            self.last_zoom = Some(zoom);
            self.events.push(ViewerEvent::ZoomChanged(zoom));
        }
    }

    fn zoom_in_gesture(&mut self, position: Point, factor: f64) {
        if self.modes.is_dashboard() {
            let change = self.modes.set_mode(ViewerMode::Page);
            self.mode_changed(change);
        } else {
            self.zoom_in(Some(factor), Some(position));
        }
    }

    fn zoom_out_gesture(&mut self, position: Point, factor: f64) {
        if self.modes.is_page_zoomed() {
            self.zoom_out(Some(factor), Some(position));
        } else if self.modes.is_page() {
            let change = self.modes.set_mode(ViewerMode::Dashboard);
            self.mode_changed(change);
        }
    }

    fn zoom_strategy(&mut self) -> ZoomStrategy<'_, V> {
        ZoomStrategy {
            viewport: &mut self.viewport,
            groups: &self.groups,
            modes: &mut self.modes,
            options: &self.config.options,
            layout: self.groups.layout(),
        }
    }

    fn go_to_strategy(&mut self) -> GoToCanvasGroupStrategy<'_, V> {
        GoToCanvasGroupStrategy {
            viewport: &mut self.viewport,
            groups: &mut self.groups,
            modes: &mut self.modes,
            config: &self.config,
            previous_index: &mut self.previous_index,
            layout: self.layout,
            scroll_direction: self.scroll.scroll_direction(),
            viewing_direction: self.viewing_direction,
        }
    }
}
