//! Panel widgets for the dashboard.

mod activity;
mod crypto;
mod news;
mod panel;
mod weather;

use std::ops::Range;

use ratatui::style::{Color, Modifier, Style};

pub use activity::ActivityWidget;
pub use crypto::CryptoWidget;
pub use news::NewsWidget;
pub use panel::PanelWidget;
pub use weather::WeatherWidget;

/// Dimmed text for labels and metadata.
pub fn subtle() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Highlight for cursors and indices.
pub fn accent() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Bold white for the main value on a line.
pub fn strong() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// How many list entries fit: a third of the height, never fewer than three.
pub fn max_list_items(height: u16) -> usize {
    usize::from(height / 3).max(3)
}

/// Indices of the list entries to draw so the selection stays on screen.
pub fn visible_window(len: usize, selected: usize, max_items: usize) -> Range<usize> {
    let count = len.min(max_items);
    let start = if selected >= count {
        selected + 1 - count
    } else {
        0
    };
    start..(start + count).min(len)
}
