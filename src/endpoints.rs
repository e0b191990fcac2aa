//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g. '/api/panels/{panel_id}', use axum's path syntax.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route the year filter widgets call to re-render the dashboard panels.
pub const DASHBOARD_PANELS: &str = "/api/dashboard";
/// The route for the chart options of a single panel.
pub const PANEL: &str = "/api/panels/{panel_id}";
/// The route listing the years that can be selected.
pub const YEARS: &str = "/api/years";

// Route paths are used to build `Uri`s, so they must parse.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_PANELS);
        assert_endpoint_is_valid_uri(endpoints::PANEL);
        assert_endpoint_is_valid_uri(endpoints::YEARS);
    }
}
