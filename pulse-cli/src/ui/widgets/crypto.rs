//! Coin prices.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pulse::format::{format_change, format_compact, format_price};
use pulse::source::CoinQuote;

use super::{strong, subtle};

pub struct CryptoWidget<'a> {
    quotes: &'a [CoinQuote],
}

impl<'a> CryptoWidget<'a> {
    pub fn new(quotes: &'a [CoinQuote]) -> Self {
        Self { quotes }
    }

    fn quote_lines(quote: &CoinQuote) -> [Line<'static>; 2] {
        let change_color = if quote.change_24h >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };
        [
            Line::from(vec![
                Span::styled(format!("{:<5} ", quote.symbol), strong()),
                Span::styled(
                    format!("{:>12} ", format_price(quote.price)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format_change(quote.change_24h),
                    Style::default().fg(change_color),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "      MCap {} · Vol {}",
                    format_compact(quote.market_cap),
                    format_compact(quote.volume_24h)
                ),
                subtle(),
            )),
        ]
    }
}

impl Widget for CryptoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.quotes.is_empty() {
            Paragraph::new(Line::from(Span::styled("No prices", subtle()))).render(area, buf);
            return;
        }
        let lines: Vec<Line> = self
            .quotes
            .iter()
            .flat_map(Self::quote_lines)
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_price_and_change() {
        let quotes = vec![CoinQuote {
            id: "bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price: 50_000.0,
            change_24h: -1.5,
            market_cap: 1.2e12,
            volume_24h: 3.4e10,
        }];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        CryptoWidget::new(&quotes).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("BTC"));
        assert!(text.contains("$50,000"));
        assert!(text.contains("▼ 1.50%"));
        assert!(text.contains("MCap $1.2T"));
    }
}
