//! Bordered frame around one source's panel.
//!
//! Draws the border and title, then fills the inside according to the
//! panel's [`PanelView`]: a loading line, an error line, or the source's
//! data widget followed by the last-updated time.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use pulse::dashboard::{
    PanelState, PanelView, Slot, PANEL_HORIZONTAL_OVERHEAD, PANEL_VERTICAL_OVERHEAD,
};
use pulse::source::{SourceData, SourceId};

use super::{accent, subtle, ActivityWidget, CryptoWidget, NewsWidget, WeatherWidget};

/// Widget for one panel slot.
///
/// Content is sized from the slot's content dimensions, not from whatever
/// area the frame hands over after clipping.
pub struct PanelWidget<'a> {
    panel: &'a PanelState,
    slot: &'a Slot,
    focused: bool,
    now: DateTime<Local>,
}

impl<'a> PanelWidget<'a> {
    pub fn new(
        panel: &'a PanelState,
        slot: &'a Slot,
        focused: bool,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            panel,
            slot,
            focused,
            now,
        }
    }

    /// Content rectangle inside the border and padding of `area`, clipped
    /// to `bounds`.
    pub fn content_area(&self, area: Rect, bounds: Rect) -> Rect {
        Rect::new(
            area.x + PANEL_HORIZONTAL_OVERHEAD / 2,
            area.y + PANEL_VERTICAL_OVERHEAD / 2,
            self.slot.content_width,
            self.slot.content_height,
        )
        .intersection(bounds)
    }

    fn title(&self, refreshing: bool) -> Line<'static> {
        let source = self.panel.source();
        let mut spans = vec![Span::styled(
            format!(" {} {} ", icon(source), source.title()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if refreshing {
            spans.push(Span::styled("* ", accent()));
        }
        Line::from(spans)
    }

    fn block(&self, refreshing: bool) -> Block<'static> {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .padding(Padding::horizontal(1))
            .title(self.title(refreshing))
    }
}

fn icon(source: SourceId) -> &'static str {
    match source {
        SourceId::Weather => "🌤",
        SourceId::Crypto => "📈",
        SourceId::News => "📰",
        SourceId::Activity => "🐙",
    }
}

fn loading_text(source: SourceId) -> &'static str {
    match source {
        SourceId::Weather => "Loading weather...",
        SourceId::Crypto => "Loading prices...",
        SourceId::News => "Loading stories...",
        SourceId::Activity => "Loading activity...",
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.panel.view();
        let refreshing = matches!(view, PanelView::Data { refreshing: true, .. });
        let block = self.block(refreshing);
        let inner = self.content_area(area, *buf.area());
        block.render(area, buf);

        match view {
            PanelView::Loading => {
                Paragraph::new(Line::from(Span::styled(
                    loading_text(self.panel.source()),
                    subtle(),
                )))
                .render(inner, buf);
            }
            PanelView::Error(err) => {
                Paragraph::new(Line::from(Span::styled(
                    format!("✗ {}", err),
                    Style::default().fg(Color::Red),
                )))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            }
            PanelView::Data {
                data, updated_at, ..
            } => {
                if inner.height == 0 {
                    return;
                }
                let body = Rect {
                    height: inner.height.saturating_sub(1),
                    ..inner
                };
                let footer = Rect {
                    y: inner.y + body.height,
                    height: 1,
                    ..inner
                };

                match data {
                    SourceData::Weather(report) => WeatherWidget::new(report).render(body, buf),
                    SourceData::Crypto(quotes) => CryptoWidget::new(quotes).render(body, buf),
                    SourceData::News(stories) => {
                        NewsWidget::new(stories, self.focused, self.now).render(body, buf)
                    }
                    SourceData::Activity(events) => {
                        ActivityWidget::new(events, self.focused, self.now).render(body, buf)
                    }
                }

                let hint = if self.panel.source().is_list() {
                    "↑↓ navigate · o open · "
                } else {
                    ""
                };
                Paragraph::new(Line::from(Span::styled(
                    format!("{}Updated {}", hint, updated_at.format("%H:%M:%S")),
                    subtle(),
                )))
                .render(footer, buf);
            }
        }
    }
}
