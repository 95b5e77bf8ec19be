//! Scroll-axis state.

use crate::model::ScrollDirection;

/// Holds the active scroll axis and reports changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollDirectionService {
    direction: ScrollDirection,
}

impl ScrollDirectionService {
    pub fn new(direction: ScrollDirection) -> Self {
        Self { direction }
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Returns `true` if the axis changed. Callers rebuild the layout on change.
    pub fn set_scroll_direction(&mut self, direction: ScrollDirection) -> bool {
        let changed = self.direction != direction;
        self.direction = direction;
        changed
    }

    pub fn is_horizontal(&self) -> bool {
        self.direction == ScrollDirection::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.direction == ScrollDirection::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_change() {
        let mut s = ScrollDirectionService::default();
        assert!(s.is_horizontal());
        assert!(!s.set_scroll_direction(ScrollDirection::Horizontal));
        assert!(s.set_scroll_direction(ScrollDirection::Vertical));
        assert!(s.is_vertical());
        assert_eq!(s.scroll_direction(), ScrollDirection::Vertical);
    }
}
