//! Public GitHub activity for one user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::error::FetchError;
use super::http::HttpClient;
use super::{Fetcher, SourceData, SourceId};
use crate::config::ActivitySettings;
use crate::dashboard::{ListItem, SelectionList};

/// GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Number of events requested per fetch.
pub const EVENT_COUNT: usize = 8;

/// One summarised activity event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityEvent {
    /// Raw GitHub event type, e.g. "PushEvent".
    pub kind: String,
    /// Full repository name, `owner/repo`.
    pub repo: String,
    /// Short verb phrase, e.g. "Pushed to".
    pub action: String,
    /// Optional second line (commit message, PR title).
    pub detail: String,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
}

impl ActivityEvent {
    /// Repository name without the owner prefix.
    pub fn repo_name(&self) -> &str {
        self.repo
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.repo)
    }
}

impl ListItem for ActivityEvent {
    fn url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiEvent {
    #[serde(rename = "type")]
    kind: String,
    repo: ApiRepo,
    payload: ApiPayload,
    created_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiRepo {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPayload {
    action: String,
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    ref_type: String,
    commits: Vec<ApiCommit>,
    pull_request: ApiPullRequest,
    issue: ApiIssue,
    comment: ApiComment,
    forkee: ApiForkee,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiCommit {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPullRequest {
    title: String,
    html_url: String,
    merged: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiIssue {
    title: String,
    html_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiComment {
    html_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiForkee {
    full_name: String,
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

fn repo_url(name: &str) -> String {
    format!("https://github.com/{}", name)
}

/// Summarise a raw event into action, detail and link.
fn summarize(event: ApiEvent) -> ActivityEvent {
    let ApiEvent {
        kind,
        repo,
        payload,
        created_at,
    } = event;
    let git_ref = payload.git_ref.unwrap_or_default();

    let (action, detail, url) = match kind.as_str() {
        "PushEvent" => {
            let detail = match payload.commits.as_slice() {
                [] => String::new(),
                [only] => first_line(&only.message).to_string(),
                [first, ..] => format!(
                    "{} commits · {}",
                    payload.commits.len(),
                    first_line(&first.message)
                ),
            };
            ("Pushed to".to_string(), detail, repo_url(&repo.name))
        }
        "CreateEvent" if payload.ref_type == "repository" => {
            ("Created repo".to_string(), String::new(), repo_url(&repo.name))
        }
        "CreateEvent" => (
            format!("Created {}", payload.ref_type),
            git_ref,
            repo_url(&repo.name),
        ),
        "WatchEvent" => ("Starred".to_string(), String::new(), repo_url(&repo.name)),
        "PullRequestEvent" => {
            let verb = if payload.action == "closed" && payload.pull_request.merged {
                "merged"
            } else {
                payload.action.as_str()
            };
            (
                format!("PR {} on", verb),
                payload.pull_request.title,
                payload.pull_request.html_url,
            )
        }
        "IssuesEvent" => (
            format!("Issue {} on", payload.action),
            payload.issue.title,
            payload.issue.html_url,
        ),
        "IssueCommentEvent" => (
            "Commented on".to_string(),
            payload.issue.title,
            payload.comment.html_url,
        ),
        "ForkEvent" => (
            "Forked".to_string(),
            format!("→ {}", payload.forkee.full_name),
            repo_url(&payload.forkee.full_name),
        ),
        "DeleteEvent" => (
            format!("Deleted {} in", payload.ref_type),
            git_ref,
            repo_url(&repo.name),
        ),
        _ => (kind.clone(), String::new(), repo_url(&repo.name)),
    };

    ActivityEvent {
        kind,
        repo: repo.name,
        action,
        detail,
        url,
        created: DateTime::parse_from_rfc3339(&created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
    }
}

/// Decode a GitHub events response.
pub fn parse_events(body: &[u8]) -> Result<Vec<ActivityEvent>, FetchError> {
    let events: Vec<ApiEvent> = serde_json::from_slice(body)?;
    Ok(events.into_iter().map(summarize).collect())
}

/// Fetches recent public events for the configured user.
pub struct ActivityFetcher {
    client: Arc<dyn HttpClient>,
    username: String,
    token: Option<String>,
}

impl ActivityFetcher {
    pub fn new(client: Arc<dyn HttpClient>, settings: &ActivitySettings) -> Self {
        Self {
            client,
            username: settings.username.clone(),
            token: settings.token.clone().filter(|t| !t.is_empty()),
        }
    }
}

impl Fetcher for ActivityFetcher {
    fn source(&self) -> SourceId {
        SourceId::Activity
    }

    fn fetch(&self) -> Result<SourceData, FetchError> {
        if self.username.is_empty() {
            return Err(FetchError::MissingConfig("activity.username"));
        }

        let url = format!(
            "{}/users/{}/events?per_page={}",
            GITHUB_API_BASE, self.username, EVENT_COUNT
        );
        let bearer = self.token.as_ref().map(|t| format!("Bearer {}", t));
        let mut headers = vec![("Accept", "application/vnd.github.v3+json")];
        if let Some(ref bearer) = bearer {
            headers.push(("Authorization", bearer.as_str()));
        }

        debug!(user = %self.username, authenticated = bearer.is_some(), "Fetching activity");
        let body = self.client.get(&url, &headers)?;
        let events = parse_events(&body)?;
        Ok(SourceData::Activity(SelectionList::new(events)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockHttpClient;

    const EVENTS: &str = r#"[
        {"type": "PushEvent", "repo": {"name": "octo/pulse"},
         "payload": {"commits": [{"message": "Fix layout\n\nlong body"}, {"message": "Tidy"}]},
         "created_at": "2024-05-01T10:00:00Z"},
        {"type": "PullRequestEvent", "repo": {"name": "octo/pulse"},
         "payload": {"action": "closed",
                     "pull_request": {"title": "Add grid", "html_url": "https://github.com/octo/pulse/pull/3", "merged": true}},
         "created_at": "2024-05-01T09:00:00Z"},
        {"type": "CreateEvent", "repo": {"name": "octo/pulse"},
         "payload": {"ref": "feature/x", "ref_type": "branch"},
         "created_at": "not a date"},
        {"type": "ForkEvent", "repo": {"name": "someone/tool"},
         "payload": {"forkee": {"full_name": "octo/tool"}},
         "created_at": "2024-05-01T08:00:00Z"},
        {"type": "GollumEvent", "repo": {"name": "octo/wiki"}, "payload": {},
         "created_at": "2024-05-01T07:00:00Z"}
    ]"#;

    fn settings(username: &str, token: Option<&str>) -> ActivitySettings {
        ActivitySettings {
            username: username.to_string(),
            token: token.map(String::from),
        }
    }

    #[test]
    fn test_parse_events_summaries() {
        let events = parse_events(EVENTS.as_bytes()).unwrap();
        assert_eq!(events.len(), 5);

        assert_eq!(events[0].action, "Pushed to");
        assert_eq!(events[0].detail, "2 commits · Fix layout");
        assert_eq!(events[0].url, "https://github.com/octo/pulse");
        assert!(events[0].created.is_some());

        assert_eq!(events[1].action, "PR merged on");
        assert_eq!(events[1].detail, "Add grid");
        assert_eq!(events[1].url, "https://github.com/octo/pulse/pull/3");

        assert_eq!(events[2].action, "Created branch");
        assert_eq!(events[2].detail, "feature/x");
        assert_eq!(events[2].created, None);

        assert_eq!(events[3].detail, "→ octo/tool");
        assert_eq!(events[3].url, "https://github.com/octo/tool");

        assert_eq!(events[4].action, "GollumEvent");
        assert_eq!(events[4].repo_name(), "wiki");
    }

    #[test]
    fn test_single_commit_push_uses_first_line() {
        let body = r#"[{"type": "PushEvent", "repo": {"name": "a/b"},
                        "payload": {"commits": [{"message": "Only\nmore"}]}}]"#;
        let events = parse_events(body.as_bytes()).unwrap();
        assert_eq!(events[0].detail, "Only");
    }

    #[test]
    fn test_fetch_sends_token_and_accept_header() {
        let client = Arc::new(MockHttpClient::new().with_response(GITHUB_API_BASE, "[]"));
        let fetcher = ActivityFetcher::new(client.clone(), &settings("octo", Some("t0k")));

        let data = fetcher.fetch().unwrap();
        assert!(matches!(data, SourceData::Activity(ref list) if list.is_empty()));

        let (url, headers) = &client.requests()[0];
        assert_eq!(url, "https://api.github.com/users/octo/events?per_page=8");
        assert!(headers.contains(&(
            "Authorization".to_string(),
            "Bearer t0k".to_string()
        )));
    }

    #[test]
    fn test_fetch_without_token_is_anonymous() {
        let client = Arc::new(MockHttpClient::new().with_response(GITHUB_API_BASE, "[]"));
        let fetcher = ActivityFetcher::new(client.clone(), &settings("octo", Some("")));

        fetcher.fetch().unwrap();
        let (_, headers) = &client.requests()[0];
        assert!(headers.iter().all(|(name, _)| name != "Authorization"));
    }

    #[test]
    fn test_fetch_without_username_is_missing_config() {
        let fetcher = ActivityFetcher::new(Arc::new(MockHttpClient::new()), &settings("", None));
        assert_eq!(
            fetcher.fetch(),
            Err(FetchError::MissingConfig("activity.username"))
        );
    }
}
