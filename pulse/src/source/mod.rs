//! Data sources polled by the dashboard.
//!
//! Each source is identified by a [`SourceId`] and fetched through the
//! [`Fetcher`] trait. Fetchers are blocking and run on tokio's blocking pool;
//! every failure mode comes back as a [`FetchError`] value so a broken source
//! can never take the dispatcher down with it.
//!
//! ```ignore
//! use std::sync::Arc;
//! use pulse::config::ConfigFile;
//! use pulse::source::{FetcherSet, ReqwestClient};
//!
//! let client = Arc::new(ReqwestClient::new()?);
//! let fetchers = FetcherSet::from_config(&ConfigFile::default(), client);
//! ```

mod activity;
mod crypto;
mod error;
mod http;
mod news;
mod weather;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigFile;
use crate::dashboard::SelectionList;

pub use activity::{parse_events, ActivityEvent, ActivityFetcher, EVENT_COUNT};
pub use crypto::{parse_quotes, symbol_for, CoinQuote, CryptoFetcher};
pub use error::FetchError;
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use news::{NewsFetcher, Story, STORY_COUNT};
pub use weather::{parse_weather, WeatherFetcher, WeatherReport};

#[cfg(test)]
pub use http::tests::MockHttpClient;

/// Refresh interval for the weather panel.
pub const WEATHER_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Refresh interval for the crypto panel. Prices move fast.
pub const CRYPTO_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Refresh interval for the news panel.
pub const NEWS_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Refresh interval for the activity panel.
pub const ACTIVITY_REFRESH_INTERVAL: Duration = Duration::from_secs(3 * 60);

/// One of the four fixed data sources.
///
/// The declaration order is the slot priority order: layout fills slots and
/// focus cycles in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    Weather,
    Crypto,
    News,
    Activity,
}

impl SourceId {
    /// All sources in priority order.
    pub const ALL: [SourceId; 4] = [
        SourceId::Weather,
        SourceId::Crypto,
        SourceId::News,
        SourceId::Activity,
    ];

    /// Number of sources.
    pub const COUNT: usize = 4;

    /// Position of this source in [`SourceId::ALL`].
    pub const fn index(self) -> usize {
        match self {
            SourceId::Weather => 0,
            SourceId::Crypto => 1,
            SourceId::News => 2,
            SourceId::Activity => 3,
        }
    }

    /// Source at the given priority position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Machine name, used in logs and configuration.
    pub fn name(self) -> &'static str {
        match self {
            SourceId::Weather => "weather",
            SourceId::Crypto => "crypto",
            SourceId::News => "news",
            SourceId::Activity => "activity",
        }
    }

    /// Human-readable panel title.
    pub fn title(self) -> &'static str {
        match self {
            SourceId::Weather => "Weather",
            SourceId::Crypto => "Crypto",
            SourceId::News => "News",
            SourceId::Activity => "GitHub",
        }
    }

    /// How long to wait after a completed fetch before polling again.
    pub fn refresh_interval(self) -> Duration {
        match self {
            SourceId::Weather => WEATHER_REFRESH_INTERVAL,
            SourceId::Crypto => CRYPTO_REFRESH_INTERVAL,
            SourceId::News => NEWS_REFRESH_INTERVAL,
            SourceId::Activity => ACTIVITY_REFRESH_INTERVAL,
        }
    }

    /// Whether the panel shows a navigable list.
    pub fn is_list(self) -> bool {
        matches!(self, SourceId::News | SourceId::Activity)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed result of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Weather(WeatherReport),
    Crypto(Vec<CoinQuote>),
    News(SelectionList<Story>),
    Activity(SelectionList<ActivityEvent>),
}

impl SourceData {
    /// The source this data belongs to.
    pub fn source(&self) -> SourceId {
        match self {
            SourceData::Weather(_) => SourceId::Weather,
            SourceData::Crypto(_) => SourceId::Crypto,
            SourceData::News(_) => SourceId::News,
            SourceData::Activity(_) => SourceId::Activity,
        }
    }

    /// Replace this data with a fresher result for the same source.
    ///
    /// List panels keep their selection index (clamped to the new length)
    /// so a background refresh does not yank the cursor back to the top.
    pub(crate) fn absorb(&mut self, fresh: SourceData) {
        match (self, fresh) {
            (SourceData::News(current), SourceData::News(fresh)) => {
                current.replace_items(fresh.into_items());
            }
            (SourceData::Activity(current), SourceData::Activity(fresh)) => {
                current.replace_items(fresh.into_items());
            }
            (current, fresh) => *current = fresh,
        }
    }

    /// Move the list selection down. No-op for non-list data.
    pub fn select_next(&mut self) {
        match self {
            SourceData::News(list) => list.select_next(),
            SourceData::Activity(list) => list.select_next(),
            SourceData::Weather(_) | SourceData::Crypto(_) => {}
        }
    }

    /// Move the list selection up. No-op for non-list data.
    pub fn select_prev(&mut self) {
        match self {
            SourceData::News(list) => list.select_prev(),
            SourceData::Activity(list) => list.select_prev(),
            SourceData::Weather(_) | SourceData::Crypto(_) => {}
        }
    }

    /// URL behind the current list selection, if any.
    pub fn selected_url(&self) -> Option<String> {
        match self {
            SourceData::News(list) => list.selected_url(),
            SourceData::Activity(list) => list.selected_url(),
            SourceData::Weather(_) | SourceData::Crypto(_) => None,
        }
    }
}

/// Fetch contract shared by every data source.
///
/// Implementations block on network I/O and are always invoked off the
/// dispatcher, on tokio's blocking pool.
pub trait Fetcher: Send + Sync {
    /// Which source this fetcher produces data for.
    fn source(&self) -> SourceId;

    /// Fetch and decode the current data.
    fn fetch(&self) -> Result<SourceData, FetchError>;
}

/// One fetcher per source, indexed by [`SourceId`].
#[derive(Clone)]
pub struct FetcherSet {
    fetchers: [Arc<dyn Fetcher>; SourceId::COUNT],
}

impl FetcherSet {
    /// Build a set from explicit fetchers.
    pub fn new(
        weather: Arc<dyn Fetcher>,
        crypto: Arc<dyn Fetcher>,
        news: Arc<dyn Fetcher>,
        activity: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            fetchers: [weather, crypto, news, activity],
        }
    }

    /// Build the production fetchers for the given configuration.
    pub fn from_config(config: &ConfigFile, client: Arc<dyn HttpClient>) -> Self {
        Self::new(
            Arc::new(WeatherFetcher::new(Arc::clone(&client), &config.weather)),
            Arc::new(CryptoFetcher::new(Arc::clone(&client), &config.crypto)),
            Arc::new(NewsFetcher::new(Arc::clone(&client))),
            Arc::new(ActivityFetcher::new(client, &config.activity)),
        )
    }

    /// Fetcher for the given source.
    pub fn get(&self, source: SourceId) -> Arc<dyn Fetcher> {
        Arc::clone(&self.fetchers[source.index()])
    }
}

impl fmt::Debug for FetcherSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherSet").finish_non_exhaustive()
    }
}
