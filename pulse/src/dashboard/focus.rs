//! Input focus among the four panel slots.

use super::visibility::VisibilitySet;
use crate::source::SourceId;

/// Tracks which panel receives list navigation and "open" keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCoordinator {
    focused: SourceId,
}

impl FocusCoordinator {
    /// Focus the first visible panel, or the first slot when none is visible.
    pub fn new(visibility: &VisibilitySet) -> Self {
        Self {
            focused: visibility.iter().next().unwrap_or(SourceId::Weather),
        }
    }

    pub fn focused(&self) -> SourceId {
        self.focused
    }

    /// Move to the next visible panel in cyclic priority order.
    ///
    /// Focus is unchanged when no other panel is visible.
    pub fn focus_next(&mut self, visibility: &VisibilitySet) -> SourceId {
        let start = self.focused.index();
        if let Some(next) = (1..=SourceId::COUNT)
            .filter_map(|step| SourceId::from_index((start + step) % SourceId::COUNT))
            .find(|source| visibility.contains(*source))
        {
            self.focused = next;
        }
        self.focused
    }

    /// Focus a panel directly, visible or not.
    ///
    /// A hidden panel may be focused ahead of being shown.
    pub fn focus_source(&mut self, source: SourceId) {
        self.focused = source;
    }

    /// Move focus off a panel that just became hidden.
    pub fn ensure_visible(&mut self, visibility: &VisibilitySet) {
        if !visibility.contains(self.focused) {
            self.focus_next(visibility);
        }
    }
}
