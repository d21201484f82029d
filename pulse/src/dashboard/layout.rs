//! Grid layout for 0-4 visible panels.
//!
//! ```text
//! 1 panel        2 panels        3 panels        4 panels
//! ┌──────────┐   ┌────┬────┐     ┌──────────┐    ┌────┬────┐
//! │          │   │    │    │     │    0     │    │ 0  │ 1  │
//! │    0     │   │ 0  │ 1  │     ├────┬─────┤    ├────┼────┤
//! │          │   │    │    │     │ 1  │  2  │    │ 2  │ 3  │
//! └──────────┘   └────┴────┘     └────┴─────┘    └────┴────┘
//! ```
//!
//! The first terminal row is the header and the last row the footer; panels
//! share what is left. Slot `n` receives the `n`-th visible source in
//! priority order. Layout is a pure function and is recomputed every frame.

use super::visibility::VisibilitySet;
use crate::source::SourceId;

/// Rows reserved for the header bar.
pub const HEADER_HEIGHT: u16 = 1;

/// Rows reserved for the footer/status bar.
pub const FOOTER_HEIGHT: u16 = 1;

/// Columns a panel spends on its border and horizontal padding.
pub const PANEL_HORIZONTAL_OVERHEAD: u16 = 4;

/// Rows a panel spends on its border.
pub const PANEL_VERTICAL_OVERHEAD: u16 = 2;

/// Smallest content width handed to a panel renderer.
pub const MIN_CONTENT_WIDTH: u16 = 10;

/// Smallest content height handed to a panel renderer.
pub const MIN_CONTENT_HEIGHT: u16 = 3;

/// Smallest slot width, border included.
pub const MIN_PANEL_WIDTH: u16 = MIN_CONTENT_WIDTH + PANEL_HORIZONTAL_OVERHEAD;

/// Smallest slot height, border included.
pub const MIN_PANEL_HEIGHT: u16 = MIN_CONTENT_HEIGHT + PANEL_VERTICAL_OVERHEAD;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One panel's place in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub source: SourceId,
    /// Outer area, border included. May extend past a tiny terminal; the
    /// renderer clips it.
    pub area: Region,
    /// Width available to panel content, never below [`MIN_CONTENT_WIDTH`].
    pub content_width: u16,
    /// Height available to panel content, never below [`MIN_CONTENT_HEIGHT`].
    pub content_height: u16,
}

/// Derived screen geometry for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub header: Region,
    pub footer: Region,
    /// Panel slots; empty when nothing is visible.
    pub slots: Vec<Slot>,
    /// Message area used instead of the grid when no panel is visible.
    pub placeholder: Option<Region>,
}

impl LayoutGeometry {
    pub fn panel_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, source: SourceId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.source == source)
    }
}

/// Area between header and footer.
fn body(width: u16, height: u16) -> Region {
    Region::new(
        0,
        HEADER_HEIGHT,
        width,
        height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT),
    )
}

/// Slot rectangles for `count` panels, before source assignment.
///
/// Returns no rectangles for a count of zero or above four.
pub fn grid(count: usize, width: u16, height: u16) -> Vec<Region> {
    let body = body(width, height);
    let full_w = body.width.max(MIN_PANEL_WIDTH);
    let half_w = (body.width / 2).max(MIN_PANEL_WIDTH);
    let full_h = body.height.max(MIN_PANEL_HEIGHT);
    let half_h = (body.height / 2).max(MIN_PANEL_HEIGHT);
    let top = body.y;
    let bottom = body.y.saturating_add(half_h);

    match count {
        1 => vec![Region::new(0, top, full_w, full_h)],
        2 => vec![
            Region::new(0, top, half_w, full_h),
            Region::new(half_w, top, half_w, full_h),
        ],
        3 => vec![
            Region::new(0, top, full_w, half_h),
            Region::new(0, bottom, half_w, half_h),
            Region::new(half_w, bottom, half_w, half_h),
        ],
        4 => vec![
            Region::new(0, top, half_w, half_h),
            Region::new(half_w, top, half_w, half_h),
            Region::new(0, bottom, half_w, half_h),
            Region::new(half_w, bottom, half_w, half_h),
        ],
        _ => Vec::new(),
    }
}

/// Compute the frame geometry for the visible set and terminal size.
pub fn layout(visibility: &VisibilitySet, width: u16, height: u16) -> LayoutGeometry {
    let header = Region::new(0, 0, width, HEADER_HEIGHT.min(height));
    let footer = Region::new(
        0,
        height.saturating_sub(FOOTER_HEIGHT),
        width,
        FOOTER_HEIGHT.min(height),
    );

    if visibility.is_empty() {
        return LayoutGeometry {
            header,
            footer,
            slots: Vec::new(),
            placeholder: Some(body(width, height)),
        };
    }

    let slots = visibility
        .iter()
        .zip(grid(visibility.count(), width, height))
        .map(|(source, area)| Slot {
            source,
            area,
            content_width: area
                .width
                .saturating_sub(PANEL_HORIZONTAL_OVERHEAD)
                .max(MIN_CONTENT_WIDTH),
            content_height: area
                .height
                .saturating_sub(PANEL_VERTICAL_OVERHEAD)
                .max(MIN_CONTENT_HEIGHT),
        })
        .collect();

    LayoutGeometry {
        header,
        footer,
        slots,
        placeholder: None,
    }
}
