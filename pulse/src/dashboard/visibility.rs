//! Which panels are shown.

use crate::source::SourceId;

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The panel went from hidden to visible.
    Shown,
    /// The panel went from visible to hidden.
    Hidden,
    /// Hiding was refused because it was the last visible panel.
    Refused,
}

/// A 4-bit set of visible panels, one bit per [`SourceId`].
///
/// Toggling never leaves the set empty. Construction may still produce an
/// empty set; the dashboard renders that as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySet {
    bits: u8,
}

impl VisibilitySet {
    const MASK: u8 = 0b1111;

    /// Every panel visible.
    pub fn all() -> Self {
        Self { bits: Self::MASK }
    }

    /// No panel visible.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build from per-source flags in priority order.
    pub fn from_flags(flags: [bool; SourceId::COUNT]) -> Self {
        let bits = SourceId::ALL
            .iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .fold(0, |bits, (source, _)| bits | Self::bit(*source));
        Self { bits }
    }

    /// Command-line semantics: no flag at all means every panel.
    pub fn from_cli_flags(flags: [bool; SourceId::COUNT]) -> Self {
        if flags.iter().any(|on| *on) {
            Self::from_flags(flags)
        } else {
            Self::all()
        }
    }

    fn bit(source: SourceId) -> u8 {
        1 << source.index()
    }

    pub fn contains(&self, source: SourceId) -> bool {
        self.bits & Self::bit(source) != 0
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Visible sources in priority order.
    pub fn iter(&self) -> impl Iterator<Item = SourceId> + '_ {
        SourceId::ALL.into_iter().filter(|s| self.contains(*s))
    }

    /// Flip one panel, refusing to hide the last visible one.
    pub fn toggle(&mut self, source: SourceId) -> Toggle {
        if !self.contains(source) {
            self.bits |= Self::bit(source);
            Toggle::Shown
        } else if self.count() > 1 {
            self.bits &= !Self::bit(source);
            Toggle::Hidden
        } else {
            Toggle::Refused
        }
    }
}

impl Default for VisibilitySet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_source() -> impl Strategy<Value = SourceId> {
        (0usize..4).prop_map(|i| SourceId::ALL[i])
    }

    #[test]
    fn test_cli_flags_default_to_all() {
        assert_eq!(VisibilitySet::from_cli_flags([false; 4]), VisibilitySet::all());

        let only_news = VisibilitySet::from_cli_flags([false, false, true, false]);
        assert_eq!(only_news.count(), 1);
        assert!(only_news.contains(SourceId::News));
    }

    #[test]
    fn test_iter_is_priority_order() {
        let set = VisibilitySet::from_flags([false, true, false, true]);
        let visible: Vec<_> = set.iter().collect();
        assert_eq!(visible, vec![SourceId::Crypto, SourceId::Activity]);
    }

    #[test]
    fn test_last_panel_cannot_be_hidden() {
        let mut set = VisibilitySet::from_flags([true, false, false, false]);
        assert_eq!(set.toggle(SourceId::Weather), Toggle::Refused);
        assert!(set.contains(SourceId::Weather));

        assert_eq!(set.toggle(SourceId::News), Toggle::Shown);
        assert_eq!(set.toggle(SourceId::Weather), Toggle::Hidden);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![SourceId::News]);
    }

    #[test]
    fn test_empty_set_can_be_toggled_on() {
        let mut set = VisibilitySet::empty();
        assert!(set.is_empty());
        assert_eq!(set.toggle(SourceId::Crypto), Toggle::Shown);
        assert_eq!(set.count(), 1);
    }

    proptest! {
        #[test]
        fn prop_toggles_never_empty_the_set(
            initial in 1u8..16,
            toggles in proptest::collection::vec(any_source(), 0..64),
        ) {
            let flags = [initial & 1 != 0, initial & 2 != 0, initial & 4 != 0, initial & 8 != 0];
            let mut set = VisibilitySet::from_flags(flags);
            for source in toggles {
                set.toggle(source);
                prop_assert!(set.count() >= 1);
            }
        }
    }
}
