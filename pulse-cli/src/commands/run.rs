//! Run command - start the interactive dashboard.

use std::sync::Arc;
use std::time::Duration;

use atty::Stream;
use tracing::info;

use pulse::config::{load_env_files, ConfigFile};
use pulse::dashboard::{DashboardOptions, VisibilitySet};
use pulse::logging::{default_log_dir, init_logging};
use pulse::source::{FetcherSet, HttpClient, ReqwestClient};

use crate::error::CliError;
use crate::opener::SystemOpener;
use crate::tui_app::{run_tui, TuiAppConfig};

/// How long in-flight fetches get to finish after the user quits.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Arguments for the run command.
pub struct RunArgs {
    /// Panels requested on the command line; none means all.
    pub visibility: VisibilitySet,
}

/// Run the dashboard until the user quits.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    load_env_files();
    let config = ConfigFile::load()?.apply_env();

    let log_dir = config
        .dashboard
        .log_dir
        .clone()
        .unwrap_or_else(default_log_dir);
    let _log_guard = init_logging(&log_dir)?;
    info!(
        version = pulse::VERSION,
        city = %config.weather.city,
        coins = ?config.crypto.coins,
        username = %config.activity.username,
        weather_key = config.weather.api_key.is_some(),
        github_token = config.activity.token.is_some(),
        "Starting pulse"
    );

    if !atty::is(Stream::Stdout) {
        return Err(CliError::Terminal(
            "stdout is not a terminal; pulse needs an interactive terminal".to_string(),
        ));
    }

    // The blocking client owns its own runtime internally and must be
    // created and finally dropped outside of tokio.
    let client = Arc::new(ReqwestClient::new().map_err(CliError::Http)?);
    let fetchers = FetcherSet::from_config(&config, Arc::clone(&client) as Arc<dyn HttpClient>);

    let tui_config = TuiAppConfig {
        fetchers,
        opener: Arc::new(SystemOpener),
        visibility: args.visibility,
        options: DashboardOptions {
            poll_hidden_panels: config.dashboard.poll_hidden_panels,
        },
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("pulse-worker")
        .build()?;
    let result = runtime.block_on(run_tui(tui_config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    drop(client);

    info!("Shutdown complete");
    result
}
