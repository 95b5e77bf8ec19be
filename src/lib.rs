//! Canvas-group layout and navigation for deep-zoom page viewers.
//!
//! Lays out a sequence of page images (canvases) on one continuous plane,
//! groups them into page-turn units (single pages or two-page spreads), and
//! drives a pan/zoom viewport between those units. Rendering is left to a
//! [`Viewport`] implementation.
//!
//! Layout is pure geometry, `no_std` compatible:
//!
//! ```
//! use zencanvas::{CanvasSource, LayoutParams, layout_canvases};
//!
//! let sources = vec![CanvasSource::new(100, 200); 3];
//! let params = LayoutParams {
//!     margin: 10.0,
//!     ..LayoutParams::default()
//! };
//! let groups = layout_canvases(&sources, &params);
//!
//! let xs: Vec<f64> = groups.groups().iter().map(|g| g.rect.x).collect();
//! assert_eq!(xs, [-50.0, 60.0, 170.0]);
//! ```
//!
//! # Modules
//!
//! - [`geometry`], [`model`], [`rotation`]: value types
//! - [`canvas_rect`], [`position`], [`grouping`]: building the layout
//! - [`canvas_groups`]: the registry of laid-out groups and the current index
//! - [`next_group`], [`swipe`]: deciding where a gesture goes
//! - [`go_to`], [`zoom`], [`constraint`]: moving the viewport
//! - [`viewer`]: the [`Viewer`] tying it together over a [`Viewport`]
//! - `svg` (feature `svg`): SVG rendering of a layout
//!
//! # Features
//!
//! - `std` (default): std-backed float math and error traits
//! - `svg`: the `svg` module
//! - `serde`: (de)serialize [`ViewerConfig`] and the model enums. Its tests
//!   run with `cargo test --features serde`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod canvas_groups;
pub mod canvas_rect;
pub mod config;
pub mod constraint;
pub mod error;
pub mod geometry;
pub mod go_to;
pub mod grouping;
pub mod mode;
pub mod model;
pub mod next_group;
pub mod position;
pub mod rotation;
pub mod scroll_direction;
#[cfg(feature = "svg")]
pub mod svg;
pub mod swipe;
pub mod viewer;
pub mod viewport;
pub mod zoom;

pub use canvas_groups::CanvasGroups;
pub use config::{ViewerConfig, ViewerOptions};
pub use constraint::ConstraintStrategy;
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use go_to::GoToCanvasGroupStrategy;
pub use grouping::{CanvasGroupStrategy, LayoutParams, layout_canvases};
pub use mode::{ModeChanges, ModeService};
pub use model::{
    CanvasGroup, CanvasSource, Direction, FitTo, ScrollDirection, Side, TileSourceAndRect, ViewerLayout, ViewerMode,
    ViewingDirection,
};
pub use next_group::{NextCanvasGroupCriteria, NextCanvasGroupStrategy};
pub use rotation::Rotation;
pub use swipe::SwipeDragEndCounter;
pub use viewer::{ClickEvent, Deferred, DragEvent, PinchEvent, ScrollEvent, Viewer, ViewerEvent};
pub use viewport::{ContainerSize, TiledImage, Viewport};
pub use zoom::ZoomStrategy;
