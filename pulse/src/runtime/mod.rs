//! Async executor for dashboard commands.
//!
//! # Architecture
//!
//! The reducer in [`crate::dashboard`] only describes side effects. This
//! module carries them out and feeds the results back as events:
//!
//! - `Fetch` runs the source's [`Fetcher`](crate::source::Fetcher) on
//!   tokio's blocking pool and posts `FetchCompleted` when it returns.
//! - `Schedule` arms the per-source deadline in a [`Scheduler`]; the event
//!   stream yields `TimerFired` once it passes.
//! - `OpenUrl` hands the link to a [`UrlOpener`], also off the async threads.
//!
//! Input from the terminal reaches the same stream through
//! [`DashboardRuntime::sender`], so the dispatcher sees one serialized
//! sequence of events.

use std::collections::VecDeque;
use std::future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::dashboard::{Command, Event, FetchOutcome, FetchTicket, Scheduler};
use crate::source::FetcherSet;

/// Opens links outside the dashboard, typically in a browser.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Whether the dispatcher should keep going after a batch of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs commands and produces the dispatcher's event stream.
pub struct DashboardRuntime {
    fetchers: FetcherSet,
    opener: Arc<dyn UrlOpener>,
    scheduler: Scheduler,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    pending: VecDeque<Event>,
    clock_period: Option<Duration>,
    clock: Option<Interval>,
}

impl DashboardRuntime {
    pub fn new(fetchers: FetcherSet, opener: Arc<dyn UrlOpener>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            fetchers,
            opener,
            scheduler: Scheduler::new(),
            event_tx,
            event_rx,
            pending: VecDeque::new(),
            clock_period: None,
            clock: None,
        }
    }

    /// Emit a `ClockTick` every `period` for the header clock.
    pub fn with_clock_tick(mut self, period: Duration) -> Self {
        self.clock_period = Some(period);
        self
    }

    /// Sender for events produced outside the runtime (keys, resizes).
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Carry out a batch of commands.
    ///
    /// Must be called from within a tokio runtime. Every command in the
    /// batch is executed; `Flow::Quit` is returned if any of them was `Quit`.
    pub fn execute(&mut self, commands: Vec<Command>) -> Flow {
        let mut flow = Flow::Continue;
        for command in commands {
            match command {
                Command::Fetch(ticket) => self.spawn_fetch(ticket),
                Command::Schedule { source, delay } => {
                    self.scheduler
                        .schedule(source, delay, Instant::now().into_std());
                }
                Command::OpenUrl(url) => self.spawn_open(url),
                Command::Quit => flow = Flow::Quit,
            }
        }
        flow
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let fetcher = self.fetchers.get(ticket.source);
        let tx = self.event_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = fetcher.fetch();
            let outcome = FetchOutcome {
                ticket,
                result,
                completed_at: Local::now(),
            };
            if tx.send(Event::FetchCompleted(outcome)).is_err() {
                debug!(source = %ticket.source, "Dispatcher gone, dropping fetch result");
            }
        });
    }

    fn spawn_open(&self, url: String) {
        let opener = Arc::clone(&self.opener);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = opener.open(&url) {
                debug!(url = %url, error = %e, "Failed to open URL");
            }
        });
    }

    /// Wait for the next event.
    ///
    /// Due timers are reported before anything else; otherwise the first of
    /// channel message, timer deadline or clock tick wins. Returns `None`
    /// only if the event channel closes, which cannot happen while the
    /// runtime holds its own sender.
    pub async fn next_event(&mut self) -> Option<Event> {
        if self.clock.is_none() {
            if let Some(period) = self.clock_period {
                let mut interval = time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.clock = Some(interval);
            }
        }

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let due = self.scheduler.take_due(Instant::now().into_std());
            if !due.is_empty() {
                self.pending.extend(due.into_iter().map(Event::TimerFired));
                continue;
            }

            let deadline = self.scheduler.next_deadline().map(Instant::from_std);

            tokio::select! {
                event = self.event_rx.recv() => {
                    if event.is_none() {
                        warn!("Event channel closed");
                    }
                    return event;
                }
                _ = sleep_until(deadline) => continue,
                _ = tick(&mut self.clock) => return Some(Event::ClockTick(Local::now())),
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

async fn tick(clock: &mut Option<Interval>) {
    match clock {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending().await,
    }
}
