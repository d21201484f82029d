//! Top stories from Hacker News.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::FetchError;
use super::http::HttpClient;
use super::{Fetcher, SourceData, SourceId};
use crate::dashboard::{ListItem, SelectionList};

/// Hacker News API base URL.
pub const NEWS_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Number of top stories shown.
pub const STORY_COUNT: usize = 8;

/// A single story.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Story {
    pub id: u64,
    pub title: String,
    /// Link target; self posts (Ask HN) have none.
    pub url: Option<String>,
    /// HTML body of self posts.
    pub text: Option<String>,
    pub score: i64,
    pub by: String,
    /// Unix timestamp.
    pub time: i64,
    #[serde(rename = "descendants")]
    pub comments: i64,
}

impl Story {
    /// Discussion page on news.ycombinator.com.
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }
}

impl ListItem for Story {
    fn url(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.discussion_url(),
        }
    }
}

/// Fetches the current top stories.
pub struct NewsFetcher {
    client: Arc<dyn HttpClient>,
}

impl NewsFetcher {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch one story; `None` when it fails or has no title.
    fn fetch_story(&self, id: u64) -> Option<Story> {
        let url = format!("{}/item/{}.json", NEWS_API_BASE, id);
        let story = self
            .client
            .get(&url, &[])
            .and_then(|body| serde_json::from_slice::<Story>(&body).map_err(FetchError::from));

        match story {
            Ok(story) if !story.title.is_empty() => Some(story),
            Ok(_) => None,
            Err(e) => {
                warn!(id, error = %e, "Skipping story");
                None
            }
        }
    }
}

impl Fetcher for NewsFetcher {
    fn source(&self) -> SourceId {
        SourceId::News
    }

    fn fetch(&self) -> Result<SourceData, FetchError> {
        let body = self
            .client
            .get(&format!("{}/topstories.json", NEWS_API_BASE), &[])?;
        let ids: Vec<u64> = serde_json::from_slice(&body)?;
        debug!(available = ids.len(), "Fetched top story ids");

        let stories = ids
            .into_iter()
            .take(STORY_COUNT)
            .filter_map(|id| self.fetch_story(id))
            .collect();

        Ok(SourceData::News(SelectionList::new(stories)))
    }
}
