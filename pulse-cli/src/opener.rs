//! Opens links in the user's browser.

use std::io;

use pulse::runtime::UrlOpener;

/// Hands web links to the platform's default browser.
///
/// Blocks until the browser launcher returns; call it off the async threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

/// Only http(s) links come from the panels; anything else is refused.
fn is_web_link(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        if !is_web_link(url) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a web link: {}", url),
            ));
        }
        webbrowser::open(url)
    }
}
