//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page, the htmx partial and the JSON API
//! - HTML view functions for rendering the dashboard UI
//! - State types used by the handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxPushUrl, HxTrigger};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::year_summary,
        charts::{DashboardChart, OptionsFormat, charts_on_load_script, init_charts_script},
        panels::{ChartPanel, build_charts},
        style::GraphStyle,
        tables::year_summary_table,
        year_filter::{YearQuery, resolve_year, year_filter_view},
    },
    dataset::SalesDataset,
    endpoints,
    html::{HeadElement, PANEL_STYLE, base},
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

const LEFT_COLUMN: [ChartPanel; 2] = [ChartPanel::GenreConsoleHeatmap, ChartPanel::TopGames];
const MIDDLE_COLUMN: [ChartPanel; 2] = [ChartPanel::RegionRadar, ChartPanel::PublisherTreemap];
const RIGHT_COLUMN: [ChartPanel; 4] = [
    ChartPanel::ConsoleSales,
    ChartPanel::GenreSales,
    ChartPanel::GenreBubble,
    ChartPanel::SalesTrend,
];

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The sales records shown by the dashboard.
    pub dataset: Arc<SalesDataset>,
    /// Styling merged into every chart.
    pub graph_style: GraphStyle,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
            graph_style: state.graph_style.clone(),
        }
    }
}

/// The years that can be selected, returned by the years API.
#[derive(Debug, Serialize)]
pub struct YearsResponse {
    /// Every year with sales records, in ascending order.
    pub years: Vec<i32>,
    /// The year shown when none is selected.
    pub default: i32,
}

/// Holds all the data needed to render the dashboard for one year.
struct DashboardData<'a> {
    years: &'a [i32],
    year: i32,
    charts: Vec<DashboardChart>,
    summary_table: Markup,
}

/// Display the dashboard for the year in the query string, or the first
/// year of the dataset.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<YearQuery>,
) -> Result<Response, Error> {
    let year = resolve_year(None, &query, &state.dataset)?;
    let data = build_dashboard_data(&state.dataset, year)
        .inspect_err(|error| tracing::error!("could not build dashboard for {year}: {error}"))?;

    Ok(dashboard_view(&data, &state.graph_style)?.into_response())
}

/// The htmx endpoint behind the year slider and dropdown.
///
/// Responds with the re-rendered year filter and panels and pushes the
/// linkable URL of the selected year to the browser history.
pub async fn get_dashboard_panels(
    State(state): State<DashboardState>,
    HxTrigger(trigger): HxTrigger,
    Query(query): Query<YearQuery>,
) -> Response {
    let year = match resolve_year(trigger.as_deref(), &query, &state.dataset) {
        Ok(year) => year,
        Err(error) => {
            tracing::warn!("Could not resolve year from {query:?}: {error}");
            return error.into_alert_response();
        }
    };

    let data = match build_dashboard_data(&state.dataset, year) {
        Ok(data) => data,
        Err(error) => {
            tracing::error!("Failed to build dashboard data: {error}");
            return error.into_alert_response();
        }
    };

    let script = match init_charts_script(&data.charts, &state.graph_style) {
        Ok(script) => script,
        Err(error) => return error.into_alert_response(),
    };

    let push_url = format!("{}?year={year}", endpoints::DASHBOARD_VIEW);

    (
        HxPushUrl(push_url),
        html! {
            (dashboard_content(&data))
            script { (PreEscaped(script)) }
        },
    )
        .into_response()
}

/// The ECharts options of one chart panel as JSON.
pub async fn get_panel_options(
    State(state): State<DashboardState>,
    Path(panel_id): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Response, Error> {
    let panel = ChartPanel::from_id(&panel_id).ok_or(Error::NotFound)?;
    let year = resolve_year(None, &query, &state.dataset)?;
    let options = panel.options(&state.dataset, year, OptionsFormat::Json)?;

    Ok(([(CONTENT_TYPE, "application/json")], options).into_response())
}

/// The years that can be selected.
pub async fn get_years(State(state): State<DashboardState>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: state.dataset.years().to_vec(),
        default: state.dataset.first_year(),
    })
}

/// Builds the charts and tables of every panel for `year`.
///
/// # Errors
/// Returns an error if `year` is not in `dataset` or a chart cannot be serialized.
fn build_dashboard_data(dataset: &SalesDataset, year: i32) -> Result<DashboardData<'_>, Error> {
    let charts = build_charts(dataset, year)?;
    let summary = year_summary(&dataset.records_for_year(year));

    Ok(DashboardData {
        years: dataset.years(),
        year,
        charts,
        summary_table: year_summary_table(&summary, year),
    })
}

/// The charts of `charts` that belong to `panels`, in the order of `panels`.
fn column<'a>(charts: &'a [DashboardChart], panels: &[ChartPanel]) -> Vec<&'a DashboardChart> {
    panels
        .iter()
        .filter_map(|panel| charts.iter().find(|chart| chart.id == panel.id()))
        .collect()
}

fn chart_container(chart: &DashboardChart) -> Markup {
    html! {
        div
            id=(chart.id)
            class={"w-full " (chart.height) " " (PANEL_STYLE)}
        {}
    }
}

/// Renders the year filter and panels. This is swapped in by htmx when the
/// year changes.
fn dashboard_content(data: &DashboardData) -> Markup {
    html!(
        (year_filter_view(data.years, data.year))

        section
            id="panels"
            class="grid grid-cols-1 lg:grid-cols-12 gap-4 w-full px-2 lg:px-4 pb-8"
        {
            div class="flex flex-col gap-4 lg:col-span-4"
            {
                @for chart in column(&data.charts, &LEFT_COLUMN) {
                    (chart_container(chart))
                }
            }

            div class="flex flex-col gap-4 lg:col-span-3"
            {
                @for chart in column(&data.charts, &MIDDLE_COLUMN) {
                    (chart_container(chart))
                }

                div class=(PANEL_STYLE) { (data.summary_table) }
            }

            div class="flex flex-col gap-4 lg:col-span-5"
            {
                @for chart in column(&data.charts, &RIGHT_COLUMN) {
                    (chart_container(chart))
                }
            }
        }
    )
}

/// Renders the full dashboard page.
fn dashboard_view(data: &DashboardData, style: &GraphStyle) -> Result<Markup, Error> {
    let content = html!(
        header class="px-4 pt-4"
        {
            h1 class="text-2xl font-bold text-center" { "Video Game Sales Dashboard" }
        }

        div id="dashboard-content" class="flex flex-col items-center w-full"
        {
            (dashboard_content(data))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        HeadElement::ScriptSource(charts_on_load_script(&data.charts, style)?),
    ];

    Ok(base("Dashboard", &scripts, &content))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::{Path, Query, State},
        http::{Response, StatusCode, header::CONTENT_TYPE},
    };
    use axum_htmx::HxTrigger;
    use scraper::{Html, Selector};

    use crate::{
        Error,
        dashboard::{
            panels::ChartPanel,
            style::GraphStyle,
            year_filter::{DROPDOWN_ID, SLIDER_ID, YearQuery},
        },
        dataset::{SalesDataset, SalesRecord},
    };

    use super::{
        DashboardState, get_dashboard_page, get_dashboard_panels, get_panel_options, get_years,
    };

    fn get_test_state() -> DashboardState {
        let dataset = SalesDataset::from_records(vec![
            SalesRecord::build("Super Mario Bros.", 1985)
                .console("NES")
                .genre("Platform")
                .sales(29.08, 3.58, 6.81, 0.77),
            SalesRecord::build("Duck Hunt", 1984)
                .console("NES")
                .genre("Shooter")
                .sales(26.93, 0.63, 0.28, 0.47),
            SalesRecord::build("Wii Sports", 2006).sales(41.49, 29.02, 3.77, 8.46),
        ])
        .unwrap();

        DashboardState {
            dataset: Arc::new(dataset),
            graph_style: GraphStyle::default(),
        }
    }

    fn year_query(year: Option<i32>) -> YearQuery {
        YearQuery {
            year,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state), Query(YearQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        for panel in ChartPanel::ALL {
            assert_element_exists(&html, panel.id());
        }
        assert_element_exists(&html, "year-summary");
        assert_element_exists(&html, SLIDER_ID);
        assert_element_exists(&html, DROPDOWN_ID);
    }

    #[tokio::test]
    async fn dashboard_page_shows_first_year_by_default() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state), Query(YearQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_selected_year(&html, "1984");
    }

    #[tokio::test]
    async fn dashboard_page_shows_year_from_query() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state), Query(year_query(Some(2006))))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_selected_year(&html, "2006");
        let caption = text_of(&html, "#year-summary caption");
        assert!(caption.contains("2006"), "got caption {caption}");
    }

    #[tokio::test]
    async fn dashboard_page_rejects_unknown_year() {
        let state = get_test_state();

        let result = get_dashboard_page(State(state), Query(year_query(Some(1990)))).await;

        assert_eq!(result.err(), Some(Error::UnknownYear(1990)));
    }

    #[tokio::test]
    async fn panels_partial_uses_triggering_widget() {
        let state = get_test_state();
        let query = YearQuery {
            slider: Some(1985),
            dropdown: Some(2006),
            year: None,
        };

        let response = get_dashboard_panels(
            State(state),
            HxTrigger(Some(DROPDOWN_ID.to_owned())),
            Query(query),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("hx-push-url").unwrap(),
            "/dashboard?year=2006"
        );

        let html = parse_fragment(response).await;
        assert_selected_year(&html, "2006");
        for panel in ChartPanel::ALL {
            assert_element_exists(&html, panel.id());
        }
        let script = text_of(&html, "script");
        assert!(script.contains("echarts.init"));
    }

    #[tokio::test]
    async fn panels_partial_snaps_slider_value() {
        let state = get_test_state();
        let query = YearQuery {
            slider: Some(2000),
            dropdown: Some(1984),
            year: None,
        };

        let response = get_dashboard_panels(
            State(state),
            HxTrigger(Some(SLIDER_ID.to_owned())),
            Query(query),
        )
        .await;

        assert_eq!(
            response.headers().get("hx-push-url").unwrap(),
            "/dashboard?year=2006"
        );
    }

    #[tokio::test]
    async fn panels_partial_shows_alert_for_unknown_year() {
        let state = get_test_state();
        let query = YearQuery {
            slider: None,
            dropdown: Some(1990),
            year: None,
        };

        let response = get_dashboard_panels(
            State(state),
            HxTrigger(Some(DROPDOWN_ID.to_owned())),
            Query(query),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-push-url").is_none());
        let html = parse_fragment(response).await;
        assert!(html.html().contains("1990"));
    }

    #[tokio::test]
    async fn panel_options_are_json() {
        let state = get_test_state();

        let response = get_panel_options(
            State(state),
            Path("top-games-chart".to_owned()),
            Query(year_query(Some(1985))),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let options: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(options.to_string().contains("Super Mario Bros."));
    }

    #[tokio::test]
    async fn unknown_panel_is_not_found() {
        let state = get_test_state();

        let result = get_panel_options(
            State(state),
            Path("pie-chart".to_owned()),
            Query(YearQuery::default()),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }

    #[tokio::test]
    async fn years_lists_available_years() {
        let state = get_test_state();

        let response = get_years(State(state)).await;

        assert_eq!(response.0.years, [1984, 1985, 2006]);
        assert_eq!(response.0.default, 1984);
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8_lossy(&body).to_string()
    }

    async fn parse_html(response: Response<Body>) -> Html {
        Html::parse_document(&body_text(response).await)
    }

    async fn parse_fragment(response: Response<Body>) -> Html {
        Html::parse_fragment(&body_text(response).await)
    }

    fn text_of(html: &Html, selector: &str) -> String {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("{selector:?} not found"))
            .text()
            .collect()
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_element_exists(html: &Html, id: &str) {
        let selector = Selector::parse(&format!("#{id}")).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Element with id '{id}' not found"
        );
    }

    #[track_caller]
    fn assert_selected_year(html: &Html, year: &str) {
        let slider = Selector::parse("#year-slider").unwrap();
        let slider = html.select(&slider).next().expect("slider not found");
        assert_eq!(slider.value().attr("value"), Some(year));

        let selected = Selector::parse("#year-dropdown option[selected]").unwrap();
        let selected = html.select(&selected).next().expect("no year selected");
        assert_eq!(selected.value().attr("value"), Some(year));
    }
}
