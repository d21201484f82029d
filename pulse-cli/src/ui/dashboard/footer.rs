//! Key help and panel toggles.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pulse::dashboard::VisibilitySet;
use pulse::source::SourceId;

use crate::keys::toggle_key;
use crate::ui::widgets::subtle;

pub struct FooterWidget<'a> {
    visibility: &'a VisibilitySet,
}

impl<'a> FooterWidget<'a> {
    pub fn new(visibility: &'a VisibilitySet) -> Self {
        Self { visibility }
    }
}

impl Widget for FooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled(" q", key),
            Span::styled(" quit  ", subtle()),
            Span::styled("r", key),
            Span::styled(" refresh  ", subtle()),
            Span::styled("tab", key),
            Span::styled(" focus  ", subtle()),
            Span::styled("│ ", subtle()),
        ];

        for source in SourceId::ALL {
            let style = if self.visibility.contains(source) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                subtle()
            };
            spans.push(Span::styled(
                format!("[{}]{} ", toggle_key(source), source.title()),
                style,
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
