//! Terminal UI for the pulse dashboard.
//!
//! # Module Structure
//!
//! - `dashboard` - Screen frame: header, panel grid, footer
//! - `widgets` - One widget per panel kind plus the bordered panel frame

pub mod dashboard;
pub mod widgets;

pub use dashboard::render;
