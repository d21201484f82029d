//! Current conditions.

use chrono::{Local, TimeZone};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pulse::format::weather_icon;
use pulse::source::WeatherReport;

use super::{strong, subtle};

pub struct WeatherWidget<'a> {
    report: &'a WeatherReport,
}

impl<'a> WeatherWidget<'a> {
    pub fn new(report: &'a WeatherReport) -> Self {
        Self { report }
    }

    fn clock(unix: i64) -> String {
        Local
            .timestamp_opt(unix, 0)
            .single()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let r = self.report;
        let value = Style::default().fg(Color::White);
        vec![
            Line::from(Span::styled(r.city.clone(), strong())),
            Line::from(vec![
                Span::styled(
                    format!("{} {:.0}°C ", weather_icon(&r.condition), r.temp),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(r.description.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("Feels like ", subtle()),
                Span::styled(format!("{:.0}°C", r.feels_like), value),
            ]),
            Line::from(vec![
                Span::styled("H/L ", subtle()),
                Span::styled(format!("{:.0}°/{:.0}°", r.temp_max, r.temp_min), value),
                Span::styled("  Humidity ", subtle()),
                Span::styled(format!("{}%", r.humidity), value),
                Span::styled("  Wind ", subtle()),
                Span::styled(format!("{:.1} m/s", r.wind_speed), value),
            ]),
            Line::from(vec![
                Span::styled("Clouds ", subtle()),
                Span::styled(format!("{}%", r.clouds), value),
                Span::styled("  Vis ", subtle()),
                Span::styled(format!("{:.1} km", r.visibility_km), value),
                Span::styled("  ", subtle()),
                Span::styled(format!("{} hPa", r.pressure), value),
            ]),
            Line::from(vec![
                Span::styled("Sunrise ", subtle()),
                Span::styled(Self::clock(r.sunrise), value),
                Span::styled("  Sunset ", subtle()),
                Span::styled(Self::clock(r.sunset), value),
            ]),
        ]
    }
}

impl Widget for WeatherWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_lines()).render(area, buf);
    }
}
