//! Per-source polling state machine.
//!
//! # Lifecycle
//!
//! ```text
//!          start()                success
//! Idle ──────────────► Loading ──────────► Ready
//!                       ▲   │                │
//!        timer / refresh│   │ failure        │ timer / refresh
//!                       │   ▼                │
//!                      Failed ◄──────────────┘ (via Loading)
//! ```
//!
//! Every issued fetch carries a [`FetchTicket`]. Only the completion whose
//! generation matches the panel's latest ticket is applied; anything older
//! was superseded by a refresh or timer fire and is dropped.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::Command;
use crate::source::{FetchError, SourceData, SourceId};

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never started.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed.
    Failed,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub source: SourceId,
    pub generation: u64,
}

/// Data from the most recent successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub data: SourceData,
    pub updated_at: DateTime<Local>,
}

/// What a panel should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelView<'a> {
    /// Nothing has arrived yet.
    Loading,
    /// No fetch has ever succeeded and the latest one failed.
    Error(&'a FetchError),
    /// Latest good data. `refreshing` is set while a newer fetch is in flight.
    Data {
        data: &'a SourceData,
        updated_at: DateTime<Local>,
        refreshing: bool,
    },
}

/// State of one source's panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    source: SourceId,
    phase: Phase,
    generation: u64,
    success: Option<Snapshot>,
    error: Option<FetchError>,
    dormant: bool,
}

impl PanelState {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            phase: Phase::Idle,
            generation: 0,
            success: None,
            error: None,
            dormant: false,
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generation of the latest issued fetch; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_success_data(&self) -> Option<&SourceData> {
        self.success.as_ref().map(|s| &s.data)
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Local>> {
        self.success.as_ref().map(|s| s.updated_at)
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Whether polling stopped while the panel was hidden.
    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    /// Whether showing this panel must kick off polling.
    pub fn needs_start(&self) -> bool {
        self.phase == Phase::Idle || self.dormant
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.dormant = false;
        debug!(source = %self.source, generation = self.generation, "Issuing fetch");
        FetchTicket {
            source: self.source,
            generation: self.generation,
        }
    }

    fn interval(&self) -> Duration {
        self.source.refresh_interval()
    }

    /// Begin polling: fetch now and arm the refresh timer.
    pub fn start(&mut self) -> Vec<Command> {
        let ticket = self.issue();
        vec![
            Command::Fetch(ticket),
            Command::Schedule {
                source: self.source,
                delay: self.interval(),
            },
        ]
    }

    /// User-requested refresh. The new schedule replaces any pending one.
    pub fn manual_refresh(&mut self) -> Vec<Command> {
        self.start()
    }

    /// Refresh timer elapsed. The completion re-arms the timer.
    pub fn on_timer_fire(&mut self) -> Vec<Command> {
        vec![Command::Fetch(self.issue())]
    }

    /// Refresh timer elapsed while hidden with hidden polling disabled.
    pub fn mark_dormant(&mut self) {
        debug!(source = %self.source, "Panel hidden, polling paused");
        self.dormant = true;
    }

    /// Apply a fetch result.
    ///
    /// Stale completions are dropped without touching state or timers.
    pub fn on_fetch_complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<SourceData, FetchError>,
        completed_at: DateTime<Local>,
    ) -> Vec<Command> {
        if ticket.source != self.source || ticket.generation != self.generation {
            debug!(
                source = %self.source,
                stale = ticket.generation,
                current = self.generation,
                "Discarding superseded fetch result"
            );
            return Vec::new();
        }

        match result {
            Ok(data) if data.source() == self.source => {
                self.phase = Phase::Ready;
                self.error = None;
                match self.success.as_mut() {
                    Some(snapshot) => {
                        snapshot.data.absorb(data);
                        snapshot.updated_at = completed_at;
                    }
                    None => {
                        self.success = Some(Snapshot {
                            data,
                            updated_at: completed_at,
                        })
                    }
                }
            }
            Ok(data) => {
                warn!(source = %self.source, got = %data.source(), "Fetcher returned data for another source");
                self.phase = Phase::Failed;
                self.error = Some(FetchError::Decode(format!(
                    "expected {} data, got {}",
                    self.source,
                    data.source()
                )));
            }
            Err(err) => {
                warn!(source = %self.source, error = %err, "Fetch failed");
                self.phase = Phase::Failed;
                self.error = Some(err);
            }
        }

        vec![Command::Schedule {
            source: self.source,
            delay: self.interval(),
        }]
    }

    /// Render contract: stale data always wins over a newer error.
    pub fn view(&self) -> PanelView<'_> {
        match (&self.success, &self.error) {
            (Some(snapshot), _) => PanelView::Data {
                data: &snapshot.data,
                updated_at: snapshot.updated_at,
                refreshing: self.phase == Phase::Loading,
            },
            (None, Some(err)) if self.phase == Phase::Failed => PanelView::Error(err),
            (None, _) => PanelView::Loading,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(snapshot) = self.success.as_mut() {
            snapshot.data.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(snapshot) = self.success.as_mut() {
            snapshot.data.select_prev();
        }
    }

    pub fn selected_url(&self) -> Option<String> {
        self.success.as_ref().and_then(|s| s.data.selected_url())
    }
}
