//! Dashboard module
//!
//! Provides the single dashboard page of chart panels over the sales dataset.
//! A year slider (desktop) or dropdown (mobile) selects the year every panel
//! is computed for.

mod aggregation;
mod charts;
mod handlers;
mod panels;
mod style;
mod tables;
mod year_filter;

pub use handlers::{get_dashboard_page, get_dashboard_panels, get_panel_options, get_years};
pub use style::{DEFAULT_FONT_SIZE, GraphStyle};
