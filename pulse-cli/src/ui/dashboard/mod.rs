//! Full-screen dashboard frame.
//!
//! ```text
//! ┌ header: name, version, clock ───────────────┐
//! │ panel grid (1-4 panels)  or  placeholder    │
//! └ footer: keys, toggle indicators ────────────┘
//! ```

mod footer;
mod header;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use pulse::dashboard::{Dashboard, Region};

pub use footer::FooterWidget;
pub use header::HeaderWidget;

use super::widgets::{subtle, PanelWidget};

const PLACEHOLDER_TEXT: &str = "All panels hidden. Press w, c, n or g to show one.";

/// Clip a layout region to the drawable area.
fn to_rect(region: Region, area: Rect) -> Rect {
    Rect::new(region.x, region.y, region.width, region.height).intersection(area)
}

/// Draw the whole dashboard into the frame.
///
/// Geometry comes from the dashboard's own size, kept current by resize
/// events; anything past the frame is clipped.
pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let area = frame.area();
    let geometry = dashboard.layout();

    frame.render_widget(
        HeaderWidget::new(dashboard.now()),
        to_rect(geometry.header, area),
    );

    for slot in &geometry.slots {
        let rect = to_rect(slot.area, area);
        if rect.is_empty() {
            continue;
        }
        let focused = dashboard.focused() == slot.source;
        frame.render_widget(
            PanelWidget::new(dashboard.panel(slot.source), slot, focused, dashboard.now()),
            rect,
        );
    }

    if let Some(region) = geometry.placeholder {
        let rect = to_rect(region, area);
        let top = rect.y + rect.height / 2;
        let line = Rect {
            y: top,
            height: rect.height.min(1),
            ..rect
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(PLACEHOLDER_TEXT, subtle())))
                .alignment(Alignment::Center),
            line,
        );
    }

    frame.render_widget(
        FooterWidget::new(dashboard.visibility()),
        to_rect(geometry.footer, area),
    );
}
