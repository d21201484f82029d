//! Title bar.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::subtle;

/// App name and version on the left, wall clock on the right.
pub struct HeaderWidget {
    now: DateTime<Local>,
}

impl HeaderWidget {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }
}

impl Widget for HeaderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(vec![
            Span::styled(
                " PULSE ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" v{}", pulse::VERSION), subtle()),
        ]);
        Paragraph::new(title).render(area, buf);

        let clock = Line::from(Span::styled(
            format!("{} ", self.now.format("%H:%M:%S")),
            Style::default().fg(Color::White),
        ));
        Paragraph::new(clock)
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}
