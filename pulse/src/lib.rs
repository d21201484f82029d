//! Pulse - a terminal dashboard for live data feeds
//!
//! This library provides the dashboard engine behind the `pulse` binary:
//! four independently polled data sources (weather, crypto prices, news
//! headlines and GitHub activity), the per-panel refresh state machine, the
//! focus and selection model, and the grid layout used to arrange panels in
//! a terminal of any size.
//!
//! # Module Structure
//!
//! - [`source`] - Data source identifiers, fetch contract and the four fetchers
//! - [`dashboard`] - Reducer, panel state machine, visibility, focus, layout
//! - [`runtime`] - Executes reducer commands: fetch tasks and refresh timers
//! - [`config`] - INI configuration file with environment overrides
//! - [`logging`] - File-based tracing setup
//! - [`format`] - Text formatting helpers shared by panel renderers

pub mod config;
pub mod dashboard;
pub mod format;
pub mod logging;
pub mod runtime;
pub mod source;

/// Crate version, shown in the dashboard header and the HTTP user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
