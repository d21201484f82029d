//! GitHub activity feed.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pulse::dashboard::SelectionList;
use pulse::format::{time_ago_short, truncate};
use pulse::source::ActivityEvent;

use super::{accent, max_list_items, subtle, visible_window};

pub struct ActivityWidget<'a> {
    events: &'a SelectionList<ActivityEvent>,
    focused: bool,
    now: DateTime<Utc>,
}

impl<'a> ActivityWidget<'a> {
    pub fn new(
        events: &'a SelectionList<ActivityEvent>,
        focused: bool,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            events,
            focused,
            now: now.with_timezone(&Utc),
        }
    }
}

impl Widget for ActivityWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.events.is_empty() {
            Paragraph::new(Line::from(Span::styled("No recent activity", subtle())))
                .render(area, buf);
            return;
        }

        let width = usize::from(area.width);
        let selected = self.events.selected_index();
        let window = visible_window(self.events.len(), selected, max_list_items(area.height));
        let mut lines = Vec::with_capacity(window.len() * 2);

        for index in window {
            let event = &self.events.items()[index];
            let is_selected = self.focused && index == selected;
            let cursor = if is_selected { "▸ " } else { "  " };
            let repo_style = if is_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let age = event
                .created
                .as_ref()
                .map(|t| time_ago_short(t, &self.now))
                .unwrap_or_default();

            lines.push(Line::from(vec![
                Span::styled(cursor, accent()),
                Span::styled("★ ", Style::default().fg(Color::Yellow)),
                Span::styled(format!("{} ", event.action), subtle()),
                Span::styled(event.repo_name().to_string(), repo_style),
                Span::styled(format!("  {}", age), subtle()),
            ]));
            let detail = if event.detail.is_empty() {
                event.repo.clone()
            } else {
                event.detail.clone()
            };
            lines.push(Line::from(Span::styled(
                format!("    {}", truncate(&detail, width.saturating_sub(4))),
                subtle(),
            )));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(repo: &str, action: &str, detail: &str, mins_ago: i64) -> ActivityEvent {
        ActivityEvent {
            kind: "PushEvent".to_string(),
            repo: repo.to_string(),
            action: action.to_string(),
            detail: detail.to_string(),
            url: format!("https://github.com/{}", repo),
            created: Some(Utc.timestamp_opt(1_700_000_000 - mins_ago * 60, 0).unwrap()),
        }
    }

    #[test]
    fn test_renders_action_repo_and_age() {
        let list = SelectionList::new(vec![
            event("octo/widgets", "Pushed to", "fix: tighten bounds", 5),
            event("octo/gadgets", "Starred", "", 180),
        ]);
        let now = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        ActivityWidget::new(&list, true, now).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Pushed to widgets  5m"));
        assert!(text.contains("fix: tighten bounds"));
        assert!(text.contains("Starred gadgets  3h"));
        assert!(text.contains("octo/gadgets"));
    }

    #[test]
    fn test_empty_feed_message() {
        let list = SelectionList::default();
        let now = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        ActivityWidget::new(&list, true, now).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No recent activity"));
    }
}
