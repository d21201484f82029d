//! Interactive terminal session.
//!
//! Owns the terminal for the lifetime of the dashboard:
//!
//! - `run_tui()` - Puts the terminal in raw mode, runs the event loop, and
//!   restores the terminal on the way out (also when the loop fails)
//! - `TuiAppConfig` - Everything the loop needs, assembled by the `run` command
//!
//! Keys and resizes are read on a plain thread and forwarded into the
//! runtime's event channel, so the loop only ever waits on one stream.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event as TermEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use pulse::dashboard::{Dashboard, DashboardOptions, Event, VisibilitySet};
use pulse::runtime::{DashboardRuntime, Flow, UrlOpener};
use pulse::source::FetcherSet;

use crate::error::CliError;
use crate::keys::action_for;
use crate::ui;

/// Header clock refresh period.
const CLOCK_TICK: Duration = Duration::from_secs(1);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Configuration for starting the TUI application.
pub struct TuiAppConfig {
    /// One fetcher per source.
    pub fetchers: FetcherSet,
    /// Handler for "open selected".
    pub opener: Arc<dyn UrlOpener>,
    /// Panels shown at launch.
    pub visibility: VisibilitySet,
    pub options: DashboardOptions,
}

/// Run the dashboard until the user quits.
pub async fn run_tui(config: TuiAppConfig) -> Result<(), CliError> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, config).await;
    let restored = restore_terminal(&mut terminal);
    result?;
    restored
}

fn setup_terminal() -> Result<Term, CliError> {
    let terminal_err = |e: io::Error| CliError::Terminal(e.to_string());

    enable_raw_mode().map_err(terminal_err)?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen).map_err(terminal_err)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_err)?;
    terminal.hide_cursor().map_err(terminal_err)?;
    terminal.clear().map_err(terminal_err)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<(), CliError> {
    let terminal_err = |e: io::Error| CliError::Terminal(e.to_string());

    disable_raw_mode().map_err(terminal_err)?;
    terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .map_err(terminal_err)?;
    terminal.show_cursor().map_err(terminal_err)?;
    Ok(())
}

async fn run_loop(terminal: &mut Term, config: TuiAppConfig) -> Result<(), CliError> {
    let mut runtime =
        DashboardRuntime::new(config.fetchers, config.opener).with_clock_tick(CLOCK_TICK);
    spawn_input_thread(runtime.sender());

    let size = terminal.size()?;
    let (mut dashboard, commands) =
        Dashboard::new(config.visibility, config.options, Local::now())
            .with_size(size.width, size.height)
            .start();
    info!(
        width = size.width,
        height = size.height,
        visible = dashboard.visibility().count(),
        "Dashboard started"
    );
    if runtime.execute(commands) == Flow::Quit {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &dashboard))?;

        let Some(event) = runtime.next_event().await else {
            break;
        };
        let (next, commands) = dashboard.update(event);
        dashboard = next;
        if runtime.execute(commands) == Flow::Quit {
            info!("Quit requested");
            break;
        }
    }

    Ok(())
}

/// Forward key presses and resizes into the dashboard's event channel.
///
/// The thread ends on the first read error or once the receiver is gone.
fn spawn_input_thread(sender: UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        let event = match event::read() {
            Ok(TermEvent::Key(key)) => match action_for(key) {
                Some(action) => Event::Action(action),
                None => continue,
            },
            Ok(TermEvent::Resize(width, height)) => Event::Resize { width, height },
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "Terminal input closed");
                break;
            }
        };
        if sender.send(event).is_err() {
            break;
        }
    });
}
