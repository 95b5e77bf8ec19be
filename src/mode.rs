//! Viewer mode state machine.
//!
//! ```text
//!              toggle                    zoom > home
//!   DASHBOARD ────────▶ PAGE ◀────────────────────────▶ PAGE_ZOOMED
//!       ▲                │          zoom <= home           │
//!       └────────────────┴─────────── toggle ──────────────┘
//! ```

use crate::model::ViewerMode;

/// A mode transition, reported only when the mode actually changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModeChanges {
    pub previous: ViewerMode,
    pub current: ViewerMode,
}

/// Current and previous viewer mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeService {
    initial: ViewerMode,
    current: ViewerMode,
    previous: ViewerMode,
}

impl Default for ModeService {
    fn default() -> Self {
        Self::new(ViewerMode::Page)
    }
}

impl ModeService {
    pub fn new(initial: ViewerMode) -> Self {
        Self {
            initial,
            current: initial,
            previous: initial,
        }
    }

    pub fn mode(&self) -> ViewerMode {
        self.current
    }

    pub fn previous_mode(&self) -> ViewerMode {
        self.previous
    }

    /// Switch to `mode`. Returns the transition, or `None` if `mode` was
    /// already current.
    pub fn set_mode(&mut self, mode: ViewerMode) -> Option<ModeChanges> {
        if mode == self.current {
            return None;
        }
        self.previous = self.current;
        self.current = mode;
        tracing::debug!(from = ?self.previous, to = ?mode, "viewer mode changed");
        Some(ModeChanges {
            previous: self.previous,
            current: mode,
        })
    }

    /// Dashboard goes to page; page and zoomed page go to dashboard.
    pub fn toggle_mode(&mut self) -> Option<ModeChanges> {
        match self.current {
            ViewerMode::Dashboard => self.set_mode(ViewerMode::Page),
            ViewerMode::Page | ViewerMode::PageZoomed => self.set_mode(ViewerMode::Dashboard),
            ViewerMode::Navigator => None,
        }
    }

    /// Page when `zoom_level` is at or below `home_zoom_level`, zoomed page
    /// above it.
    pub fn set_viewer_mode_by_zoom_level(&mut self, zoom_level: f64, home_zoom_level: f64) -> Option<ModeChanges> {
        if zoom_level > home_zoom_level {
            self.set_mode(ViewerMode::PageZoomed)
        } else {
            self.set_mode(ViewerMode::Page)
        }
    }

    /// Back to the mode the service was created with, with no history.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.previous = self.initial;
    }

    pub fn is_dashboard(&self) -> bool {
        self.current == ViewerMode::Dashboard
    }

    pub fn is_page(&self) -> bool {
        self.current == ViewerMode::Page
    }

    pub fn is_page_zoomed(&self) -> bool {
        self.current == ViewerMode::PageZoomed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_dashboard() {
        let mut m = ModeService::new(ViewerMode::Dashboard);
        assert_eq!(
            m.toggle_mode(),
            Some(ModeChanges {
                previous: ViewerMode::Dashboard,
                current: ViewerMode::Page,
            })
        );
        assert!(m.is_page());
        m.toggle_mode();
        assert!(m.is_dashboard());
        m.set_mode(ViewerMode::PageZoomed);
        m.toggle_mode();
        assert!(m.is_dashboard());
        assert_eq!(m.previous_mode(), ViewerMode::PageZoomed);
    }

    #[test]
    fn unchanged_mode_reports_nothing() {
        let mut m = ModeService::default();
        assert_eq!(m.set_mode(ViewerMode::Page), None);
        assert_eq!(m.previous_mode(), ViewerMode::Page);
    }

    #[test]
    fn mode_by_zoom_level() {
        let mut m = ModeService::default();
        m.set_viewer_mode_by_zoom_level(1.5, 1.0);
        assert!(m.is_page_zoomed());
        m.set_viewer_mode_by_zoom_level(1.0, 1.0);
        assert!(m.is_page());
        m.set_viewer_mode_by_zoom_level(0.5, 1.0);
        assert!(m.is_page());
    }

    #[test]
    fn reset_restores_initial() {
        let mut m = ModeService::new(ViewerMode::Dashboard);
        m.toggle_mode();
        m.reset();
        assert!(m.is_dashboard());
        assert_eq!(m.previous_mode(), ViewerMode::Dashboard);
    }
}
