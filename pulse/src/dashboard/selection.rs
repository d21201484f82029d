//! Cursor over a bounded list with wraparound navigation.

/// An item that links somewhere the user can open.
pub trait ListItem {
    /// Target opened by the "open selected" action.
    fn url(&self) -> String;
}

/// Items plus a selected index.
///
/// Invariant: `selected < items.len()` whenever the list is non-empty, and
/// `selected == 0` when it is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionList<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
        }
    }
}

impl<T> SelectionList<T> {
    /// Create a list with the first item selected.
    pub fn new(items: Vec<T>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Advance the cursor, wrapping from the last item to the first.
    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move the cursor back, wrapping from the first item to the last.
    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            let len = self.items.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Swap in new items, keeping the cursor position where it still fits.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: ListItem> SelectionList<T> {
    /// URL of the selected item, `None` for an empty list.
    pub fn selected_url(&self) -> Option<String> {
        self.selected().map(ListItem::url)
    }
}
