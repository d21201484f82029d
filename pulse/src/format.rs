//! Text formatting helpers shared by the panel renderers.

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

/// Format a USD price.
///
/// Prices of one dollar or more are rounded to whole dollars with comma
/// grouping (`$50,000`); smaller prices keep four decimals (`$0.1234`).
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${}", group_thousands(price.round() as u64))
    } else {
        format!("${:.4}", price)
    }
}

/// Insert commas between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a large dollar amount with a T/B/M/K suffix.
pub fn format_compact(n: f64) -> String {
    if n >= 1e12 {
        format!("${:.1}T", n / 1e12)
    } else if n >= 1e9 {
        format!("${:.1}B", n / 1e9)
    } else if n >= 1e6 {
        format!("${:.1}M", n / 1e6)
    } else if n >= 1e3 {
        format!("${:.0}K", n / 1e3)
    } else {
        format!("${:.0}", n)
    }
}

/// Signed percentage with an arrow, e.g. `▲ 2.35%`.
pub fn format_change(percent: f64) -> String {
    if percent >= 0.0 {
        format!("▲ {:.2}%", percent)
    } else {
        format!("▼ {:.2}%", percent.abs())
    }
}

/// Short relative age used in the activity feed: `now`, `5m`, `3h`, `2d`.
pub fn time_ago_short<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let secs = now.clone().signed_duration_since(then.clone()).num_seconds().max(0);
    match secs {
        s if s < 60 => "now".to_string(),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

/// Relative age of a Unix timestamp used in the news list: `just now`,
/// `5m ago`, `3h ago`, `2d ago`.
pub fn time_ago_unix(unix: i64, now: &DateTime<Utc>) -> String {
    let secs = (now.timestamp() - unix).max(0);
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86_400),
    }
}

/// Host of a URL without a leading `www.`; empty when unparsable.
pub fn domain_from(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}

/// Drop HTML tags and flatten newlines.
pub fn strip_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '\n' if !in_tag => out.push(' '),
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Cut `s` to at most `max` characters, ending in `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Icon for an OpenWeatherMap condition group.
pub fn weather_icon(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀",
        "Clouds" => "☁",
        "Rain" | "Drizzle" => "🌧",
        "Snow" => "❄",
        "Thunderstorm" => "⛈",
        _ => "🌤",
    }
}
