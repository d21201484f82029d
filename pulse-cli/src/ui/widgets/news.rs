//! Top stories list.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pulse::dashboard::SelectionList;
use pulse::format::{domain_from, strip_html, time_ago_unix, truncate};
use pulse::source::Story;

use super::{accent, max_list_items, subtle, visible_window};

pub struct NewsWidget<'a> {
    stories: &'a SelectionList<Story>,
    focused: bool,
    now: DateTime<Utc>,
}

impl<'a> NewsWidget<'a> {
    pub fn new(stories: &'a SelectionList<Story>, focused: bool, now: DateTime<Local>) -> Self {
        Self {
            stories,
            focused,
            now: now.with_timezone(&Utc),
        }
    }

    fn detail(&self, story: &Story, width: usize) -> String {
        let source = match story.url.as_deref() {
            Some(url) if !url.is_empty() => domain_from(url),
            _ => story
                .text
                .as_deref()
                .map(strip_html)
                .map(|t| truncate(&t, 40))
                .unwrap_or_default(),
        };
        let meta = format!(
            "{} pts · by {} · {} comments · {}",
            story.score,
            story.by,
            story.comments,
            time_ago_unix(story.time, &self.now)
        );
        let line = if source.is_empty() {
            meta
        } else {
            format!("{} · {}", source, meta)
        };
        truncate(&line, width)
    }
}

impl Widget for NewsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.stories.is_empty() {
            Paragraph::new(Line::from(Span::styled("No stories", subtle()))).render(area, buf);
            return;
        }

        let width = usize::from(area.width);
        let selected = self.stories.selected_index();
        let window = visible_window(self.stories.len(), selected, max_list_items(area.height));
        let mut lines = Vec::with_capacity(window.len() * 2);

        for index in window {
            let story = &self.stories.items()[index];
            let is_selected = self.focused && index == selected;
            let cursor = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let number = format!("{}. ", index + 1);
            let title_room =
                width.saturating_sub(cursor.chars().count() + number.chars().count());

            lines.push(Line::from(vec![
                Span::styled(cursor, accent()),
                Span::styled(number, accent()),
                Span::styled(truncate(&story.title, title_room), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", self.detail(story, width.saturating_sub(4))),
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

    fn story(id: u64, title: &str) -> Story {
        Story {
            id,
            title: title.to_string(),
            url: Some(format!("https://www.example.com/{}", id)),
            score: 120,
            by: "alice".to_string(),
            time: 1_700_000_000 - 7200,
            comments: 45,
            ..Story::default()
        }
    }

    fn render(list: &SelectionList<Story>, focused: bool) -> String {
        let now = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let area = Rect::new(0, 0, 70, 12);
        let mut buf = Buffer::empty(area);
        NewsWidget::new(list, focused, now).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_title_and_metadata() {
        let list = SelectionList::new(vec![story(1, "Rust 2.0 released")]);
        let text = render(&list, true);
        assert!(text.contains("▸ 1. Rust 2.0 released"));
        assert!(text.contains("example.com · 120 pts · by alice · 45 comments · 2h ago"));
    }

    #[test]
    fn test_selected_title_uses_full_width() {
        // 2 columns of cursor, 3 of "1. ", 25 left for the title.
        let title = "abcdefghijklmnopqrstuvwxy";
        let list = SelectionList::new(vec![story(1, title)]);
        let now = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        NewsWidget::new(&list, true, now).render(area, &mut buf);
        let first_row: String = buf.content()[..30].iter().map(|c| c.symbol()).collect();
        assert_eq!(first_row, format!("▸ 1. {}", title));
    }

    #[test]
    fn test_cursor_hidden_when_unfocused() {
        let list = SelectionList::new(vec![story(1, "First"), story(2, "Second")]);
        let text = render(&list, false);
        assert!(!text.contains('▸'));
        assert!(text.contains("2. Second"));
    }

    #[test]
    fn test_self_post_shows_snippet() {
        let mut ask = story(3, "Ask HN: anything");
        ask.url = None;
        ask.text = Some("<p>What do you use?</p>".to_string());
        let list = SelectionList::new(vec![ask]);
        let text = render(&list, true);
        assert!(text.contains("What do you use?"));
    }
}
