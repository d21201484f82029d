//! Dashboard state and the reducer that drives it.
//!
//! # Architecture
//!
//! All dashboard state lives in [`Dashboard`] and changes only through
//! [`Dashboard::update`]. The reducer takes the state by value together with
//! one [`Event`] and returns the new state plus the [`Command`]s it wants
//! executed. It performs no I/O and never reads a clock, so every behaviour
//! can be driven from tests with hand-built events.
//!
//! ```text
//! keys / resize ─┐
//! timer fires  ──┼──► Event ──► Dashboard::update ──► Vec<Command> ──► runtime
//! fetch results ─┘                                     Fetch / Schedule / OpenUrl / Quit
//! ```
//!
//! Side effects (fetch tasks, refresh timers, opening URLs) belong to
//! [`crate::runtime`].

mod focus;
mod layout;
mod panel;
mod scheduler;
mod selection;
mod visibility;

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::source::{FetchError, SourceData, SourceId};

pub use focus::FocusCoordinator;
pub use layout::{
    grid, layout, LayoutGeometry, Region, Slot, FOOTER_HEIGHT, HEADER_HEIGHT, MIN_CONTENT_HEIGHT,
    MIN_CONTENT_WIDTH, MIN_PANEL_HEIGHT, MIN_PANEL_WIDTH, PANEL_HORIZONTAL_OVERHEAD,
    PANEL_VERTICAL_OVERHEAD,
};
pub use panel::{FetchTicket, PanelState, PanelView, Phase, Snapshot};
pub use scheduler::Scheduler;
pub use selection::{ListItem, SelectionList};
pub use visibility::{Toggle, VisibilitySet};

/// Terminal size assumed until the first resize event.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// A user intent, already decoupled from the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Refresh every visible panel.
    Refresh,
    FocusNext,
    Focus(SourceId),
    Toggle(SourceId),
    SelectNext,
    SelectPrev,
    OpenSelected,
}

/// A finished fetch, delivered back to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<SourceData, FetchError>,
    pub completed_at: DateTime<Local>,
}

/// Everything the dispatcher reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resize { width: u16, height: u16 },
    Action(Action),
    TimerFired(SourceId),
    FetchCompleted(FetchOutcome),
    /// Wall-clock update for the header.
    ClockTick(DateTime<Local>),
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the source's fetcher and report back with this ticket.
    Fetch(FetchTicket),
    /// Arm the source's refresh timer, replacing any pending one.
    Schedule { source: SourceId, delay: Duration },
    /// Open a link in the user's browser.
    OpenUrl(String),
    Quit,
}

/// Startup options that do not change while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Keep polling panels while they are hidden.
    ///
    /// When off, hidden panels are not started at launch and pause once
    /// their timer next fires; showing them resumes polling.
    pub poll_hidden_panels: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            poll_hidden_panels: true,
        }
    }
}

/// Complete dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    panels: [PanelState; SourceId::COUNT],
    visibility: VisibilitySet,
    focus: FocusCoordinator,
    options: DashboardOptions,
    size: (u16, u16),
    now: DateTime<Local>,
}

impl Dashboard {
    pub fn new(visibility: VisibilitySet, options: DashboardOptions, now: DateTime<Local>) -> Self {
        Self {
            panels: SourceId::ALL.map(PanelState::new),
            visibility,
            focus: FocusCoordinator::new(&visibility),
            options,
            size: DEFAULT_SIZE,
            now,
        }
    }

    /// Set the initial terminal size.
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    /// Start polling. Hidden panels start too unless hidden polling is off.
    pub fn start(mut self) -> (Self, Vec<Command>) {
        let mut commands = Vec::new();
        for source in SourceId::ALL {
            if self.options.poll_hidden_panels || self.visibility.contains(source) {
                commands.extend(self.panel_mut(source).start());
            }
        }
        info!(
            visible = self.visibility.count(),
            poll_hidden = self.options.poll_hidden_panels,
            "Dashboard started"
        );
        (self, commands)
    }

    /// Apply one event.
    pub fn update(mut self, event: Event) -> (Self, Vec<Command>) {
        let commands = match event {
            Event::Resize { width, height } => {
                self.size = (width, height);
                Vec::new()
            }
            Event::ClockTick(now) => {
                self.now = now;
                Vec::new()
            }
            Event::TimerFired(source) => self.on_timer(source),
            Event::FetchCompleted(outcome) => {
                let source = outcome.ticket.source;
                self.panel_mut(source).on_fetch_complete(
                    outcome.ticket,
                    outcome.result,
                    outcome.completed_at,
                )
            }
            Event::Action(action) => self.on_action(action),
        };
        (self, commands)
    }

    fn on_timer(&mut self, source: SourceId) -> Vec<Command> {
        if !self.options.poll_hidden_panels && !self.visibility.contains(source) {
            self.panel_mut(source).mark_dormant();
            return Vec::new();
        }
        self.panel_mut(source).on_timer_fire()
    }

    fn on_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => vec![Command::Quit],
            Action::Refresh => {
                let visible: Vec<SourceId> = self.visibility.iter().collect();
                debug!(panels = visible.len(), "Manual refresh");
                visible
                    .into_iter()
                    .flat_map(|source| self.panel_mut(source).manual_refresh())
                    .collect()
            }
            Action::FocusNext => {
                self.focus.focus_next(&self.visibility);
                Vec::new()
            }
            Action::Focus(source) => {
                self.focus.focus_source(source);
                Vec::new()
            }
            Action::Toggle(source) => self.on_toggle(source),
            Action::SelectNext => {
                let focused = self.focus.focused();
                self.panel_mut(focused).select_next();
                Vec::new()
            }
            Action::SelectPrev => {
                let focused = self.focus.focused();
                self.panel_mut(focused).select_prev();
                Vec::new()
            }
            Action::OpenSelected => self
                .panel(self.focus.focused())
                .selected_url()
                .map(Command::OpenUrl)
                .into_iter()
                .collect(),
        }
    }

    fn on_toggle(&mut self, source: SourceId) -> Vec<Command> {
        match self.visibility.toggle(source) {
            Toggle::Shown => {
                debug!(%source, "Panel shown");
                if !self.visibility.contains(self.focus.focused()) {
                    self.focus.focus_source(source);
                }
                let panel = self.panel_mut(source);
                if panel.needs_start() {
                    panel.start()
                } else {
                    Vec::new()
                }
            }
            Toggle::Hidden => {
                debug!(%source, "Panel hidden");
                self.focus.ensure_visible(&self.visibility);
                Vec::new()
            }
            Toggle::Refused => {
                debug!(%source, "Refusing to hide the last visible panel");
                Vec::new()
            }
        }
    }

    fn panel_mut(&mut self, source: SourceId) -> &mut PanelState {
        &mut self.panels[source.index()]
    }

    pub fn panel(&self, source: SourceId) -> &PanelState {
        &self.panels[source.index()]
    }

    pub fn panels(&self) -> &[PanelState] {
        &self.panels
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    pub fn focused(&self) -> SourceId {
        self.focus.focused()
    }

    pub fn options(&self) -> DashboardOptions {
        self.options
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Time of the last clock tick.
    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// Geometry for the current visible set and terminal size.
    pub fn layout(&self) -> LayoutGeometry {
        layout(&self.visibility, self.size.0, self.size.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::WeatherReport;
    use chrono::TimeZone;

    fn t0() -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn fetches(commands: &[Command]) -> Vec<FetchTicket> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Fetch(ticket) => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    fn hidden_polling_off() -> DashboardOptions {
        DashboardOptions {
            poll_hidden_panels: false,
        }
    }

    #[test]
    fn test_start_polls_every_source_by_default() {
        let vis = VisibilitySet::from_flags([true, false, false, false]);
        let (dash, commands) = Dashboard::new(vis, DashboardOptions::default(), t0()).start();
        assert_eq!(fetches(&commands).len(), 4);
        assert!(dash.panels().iter().all(|p| p.phase() == Phase::Loading));
    }

    #[test]
    fn test_start_skips_hidden_when_polling_off() {
        let vis = VisibilitySet::from_flags([true, false, true, false]);
        let (dash, commands) = Dashboard::new(vis, hidden_polling_off(), t0()).start();
        let sources: Vec<_> = fetches(&commands).iter().map(|t| t.source).collect();
        assert_eq!(sources, vec![SourceId::Weather, SourceId::News]);
        assert_eq!(dash.panel(SourceId::Crypto).phase(), Phase::Idle);
    }

    #[test]
    fn test_showing_idle_panel_starts_it_once() {
        let vis = VisibilitySet::from_flags([true, false, false, false]);
        let (dash, _) = Dashboard::new(vis, hidden_polling_off(), t0()).start();

        let (dash, commands) = dash.update(Event::Action(Action::Toggle(SourceId::News)));
        assert_eq!(
            fetches(&commands),
            vec![FetchTicket {
                source: SourceId::News,
                generation: 1
            }]
        );

        // Hiding and showing again does not duplicate polling.
        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::News)));
        let (_, commands) = dash.update(Event::Action(Action::Toggle(SourceId::News)));
        assert!(commands.is_empty());
    }

    #[test]
    fn test_hidden_timer_goes_dormant_when_polling_off() {
        let (dash, _) = Dashboard::new(VisibilitySet::all(), hidden_polling_off(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::Crypto)));

        let (dash, commands) = dash.update(Event::TimerFired(SourceId::Crypto));
        assert!(commands.is_empty());
        assert!(dash.panel(SourceId::Crypto).is_dormant());

        let (_, commands) = dash.update(Event::Action(Action::Toggle(SourceId::Crypto)));
        assert_eq!(fetches(&commands).len(), 1);
    }

    #[test]
    fn test_hidden_timer_keeps_polling_by_default() {
        let (dash, _) = Dashboard::new(VisibilitySet::all(), DashboardOptions::default(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::Crypto)));
        let (_, commands) = dash.update(Event::TimerFired(SourceId::Crypto));
        assert_eq!(fetches(&commands).len(), 1);
    }

    #[test]
    fn test_refresh_only_touches_visible_panels() {
        let vis = VisibilitySet::from_flags([false, true, false, true]);
        let (dash, _) = Dashboard::new(vis, DashboardOptions::default(), t0()).start();
        let (_, commands) = dash.update(Event::Action(Action::Refresh));

        let sources: Vec<_> = fetches(&commands).iter().map(|t| t.source).collect();
        assert_eq!(sources, vec![SourceId::Crypto, SourceId::Activity]);
        let schedules = commands
            .iter()
            .filter(|c| matches!(c, Command::Schedule { .. }))
            .count();
        assert_eq!(schedules, 2);
    }

    #[test]
    fn test_hiding_focused_panel_moves_focus() {
        let (dash, _) = Dashboard::new(VisibilitySet::all(), DashboardOptions::default(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Focus(SourceId::News)));
        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::News)));
        assert_eq!(dash.focused(), SourceId::Activity);
    }

    #[test]
    fn test_showing_panel_from_empty_set_takes_focus() {
        let (dash, _) =
            Dashboard::new(VisibilitySet::empty(), DashboardOptions::default(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::Crypto)));
        assert!(dash.visibility().contains(dash.focused()));
        assert_eq!(dash.focused(), SourceId::Crypto);
    }

    #[test]
    fn test_showing_other_panel_moves_prearmed_focus() {
        let vis = VisibilitySet::from_flags([true, false, false, false]);
        let (dash, _) = Dashboard::new(vis, DashboardOptions::default(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Focus(SourceId::News)));
        assert_eq!(dash.focused(), SourceId::News);

        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::Crypto)));
        assert_eq!(dash.focused(), SourceId::Crypto);

        let (dash, _) = dash.update(Event::Action(Action::Toggle(SourceId::Activity)));
        assert_eq!(dash.focused(), SourceId::Crypto);
    }

    #[test]
    fn test_last_panel_toggle_is_refused() {
        let vis = VisibilitySet::from_flags([false, false, false, true]);
        let (dash, _) = Dashboard::new(vis, DashboardOptions::default(), t0()).start();
        let (dash, commands) = dash.update(Event::Action(Action::Toggle(SourceId::Activity)));
        assert!(commands.is_empty());
        assert_eq!(dash.visibility().count(), 1);
    }

    #[test]
    fn test_open_selected_without_data_does_nothing() {
        let (dash, _) = Dashboard::new(VisibilitySet::all(), DashboardOptions::default(), t0()).start();
        let (dash, _) = dash.update(Event::Action(Action::Focus(SourceId::News)));
        let (_, commands) = dash.update(Event::Action(Action::OpenSelected));
        assert!(commands.is_empty());
    }

    #[test]
    fn test_quit_resize_and_clock() {
        let dash = Dashboard::new(VisibilitySet::all(), DashboardOptions::default(), t0());
        let (dash, commands) = dash.update(Event::Action(Action::Quit));
        assert_eq!(commands, vec![Command::Quit]);

        let (dash, _) = dash.update(Event::Resize {
            width: 120,
            height: 40,
        });
        assert_eq!(dash.size(), (120, 40));
        assert_eq!(dash.layout().panel_count(), 4);

        let later = t0() + chrono::Duration::seconds(1);
        let (dash, _) = dash.update(Event::ClockTick(later));
        assert_eq!(dash.now(), later);
    }

    #[test]
    fn test_completion_routes_to_ticket_source() {
        let (dash, commands) =
            Dashboard::new(VisibilitySet::all(), DashboardOptions::default(), t0()).start();
        let weather = fetches(&commands)[0];

        let (dash, commands) = dash.update(Event::FetchCompleted(FetchOutcome {
            ticket: weather,
            result: Ok(SourceData::Weather(WeatherReport::default())),
            completed_at: t0(),
        }));
        assert_eq!(
            commands,
            vec![Command::Schedule {
                source: SourceId::Weather,
                delay: SourceId::Weather.refresh_interval()
            }]
        );
        assert_eq!(dash.panel(SourceId::Weather).phase(), Phase::Ready);
        assert_eq!(dash.panel(SourceId::Crypto).phase(), Phase::Loading);
    }
}
