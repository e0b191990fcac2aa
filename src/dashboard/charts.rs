//! Chart generation and rendering for the dashboard.
//!
//! This module creates the ECharts visualizations for the selected year:
//! - **Units sold by genre/console**: bar charts stacked by sales region
//! - **Top selling games**: horizontal bar chart of the five best sellers
//! - **Publisher sales**: treemap of the ten largest publishers
//! - **Region sales**: radar chart of the regional totals
//! - **Genre sales and releases**: bubble chart sized by the number of releases
//! - **Genre/console heatmap**: global sales per genre and console
//! - **Sales trend**: global sales per year over the whole dataset
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.
//! The series types that charming does not model the way the dashboard needs
//! (treemap, radar, bubble and heatmap) are written directly as JSON on top
//! of a charming chart.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::PreEscaped;
use serde_json::{Value, json};

use crate::{
    Error,
    dashboard::{
        aggregation::{
            Category, genre_summaries, global_sales_by, region_totals, regional_sales_by,
            sales_matrix, top_n, yearly_global_sales,
        },
        style::GraphStyle,
    },
    dataset::{Region, SalesRecord},
};

const UNITS_AXIS_NAME: &str = "Units Sold (M)";
const TOP_GAMES_COUNT: usize = 5;
const TOP_PUBLISHERS_COUNT: usize = 10;
const BUBBLE_MIN_SIZE: f64 = 6.0;
const BUBBLE_MAX_SIZE: f64 = 40.0;

/// A dashboard chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone)]
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The tailwind height class of the chart container
    pub height: &'static str,
    /// The ECharts configuration as a JavaScript object literal
    pub options: String,
}

/// How chart options are rendered.
/// How chart options are rendered to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OptionsFormat {
    /// A JavaScript object literal for the init script, with formatter functions.
    Script,
    /// Plain JSON. Formatter functions are left out.
    Json,
}

impl OptionsFormat {
    /// Renders a charming chart in this format.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the chart cannot be serialized.
    pub fn render(self, chart: &Chart) -> Result<String, Error> {
        match self {
            OptionsFormat::Script => Ok(chart.to_string()),
            OptionsFormat::Json => Ok(serde_json::to_string(chart)?),
        }
    }
}

/// Generates JavaScript code that draws `charts` into their containers.
///
/// Charts drawn by a previous call are disposed first so the script can be
/// run again after htmx swaps in new containers. `style` is merged into the
/// options of every chart.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if `style` cannot be serialized.
pub(super) fn init_charts_script(
    charts: &[DashboardChart],
    style: &GraphStyle,
) -> Result<String, Error> {
    let style = serde_json::to_string(style)?;

    let chart_scripts = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{
                        return;
                    }}
                    const chart = echarts.init(chartDom, 'dark');
                    const option = Object.assign({}, GRAPH_STYLE);
                    chart.setOption(option);
                    window.dashboardCharts.push(chart);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        r#"(function() {{
            const GRAPH_STYLE = {style};
            (window.dashboardCharts || []).forEach((chart) => chart.dispose());
            window.dashboardCharts = [];
            if (!window.dashboardResizeListener) {{
                window.dashboardResizeListener = () =>
                    window.dashboardCharts.forEach((chart) => chart.resize());
                window.addEventListener('resize', window.dashboardResizeListener);
            }}
            {chart_scripts}
        }})();"#
    ))
}

/// Wraps [init_charts_script] so that it runs once the page has loaded.
pub(super) fn charts_on_load_script(
    charts: &[DashboardChart],
    style: &GraphStyle,
) -> Result<PreEscaped<String>, Error> {
    let script = init_charts_script(charts, style)?;

    Ok(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script}\n}});"
    )))
}

/// Units sold by `category`, one stacked bar series per sales region.
pub(super) fn regional_sales_chart(
    title: &str,
    category: Category,
    records: &[&SalesRecord],
    format: OptionsFormat,
) -> Chart {
    let totals = regional_sales_by(records, category);
    let labels: Vec<String> = totals.iter().map(|(key, _)| key.clone()).collect();

    let mut chart = Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .tooltip(units_tooltip(format))
        .legend(Legend::new().left("right").top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(UNITS_AXIS_NAME)
                .axis_label(units_axis_label(format)),
        );

    for region in Region::ALL {
        let values: Vec<f64> = totals.iter().map(|(_, sales)| sales.get(region)).collect();

        chart = chart.series(
            bar::Bar::new()
                .name(region.label())
                .stack("Region")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values),
        );
    }

    chart
}

/// The best selling games as a horizontal bar chart with the best seller on top.
pub(super) fn top_games_chart(records: &[&SalesRecord], format: OptionsFormat) -> Chart {
    let top_games = top_n(global_sales_by(records, Category::Name), TOP_GAMES_COUNT);

    // Category axes draw the first entry at the bottom.
    let (names, values): (Vec<String>, Vec<f64>) = top_games.into_iter().rev().unzip();

    Chart::new()
        .title(Title::new().text("Top Selling Games").left(20).top("1%"))
        .tooltip(units_tooltip(format))
        .grid(
            Grid::new()
                .left("3%")
                .right("8%")
                .bottom("3%")
                .top(50)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(UNITS_AXIS_NAME)
                .axis_label(units_axis_label(format)),
        )
        .y_axis(Axis::new().type_(AxisType::Category).name("Game").data(names))
        .series(bar::Bar::new().name(UNITS_AXIS_NAME).data(values))
}

/// Global sales of the largest publishers as a treemap.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the chart cannot be serialized.
pub(super) fn publisher_treemap(records: &[&SalesRecord]) -> Result<Value, Error> {
    let top_publishers = top_n(
        global_sales_by(records, Category::Publisher),
        TOP_PUBLISHERS_COUNT,
    );

    let nodes: Vec<Value> = top_publishers
        .iter()
        .map(|(publisher, sales)| json!({ "name": publisher, "value": sales }))
        .collect();

    let chart = Chart::new().title(
        Title::new()
            .text("Global Publisher Sales Distribution")
            .left(20)
            .top("1%"),
    );

    let mut options = serde_json::to_value(&chart)?;
    options["tooltip"] = json!({ "trigger": "item", "formatter": "{b}: {c}M" });
    options["series"] = json!([{
        "type": "treemap",
        "name": "Publishers",
        "top": 50,
        "roam": false,
        "nodeClick": false,
        "breadcrumb": { "show": false },
        "label": { "show": true, "formatter": "{b}\n{c}M" },
        "data": nodes,
    }]);

    Ok(options)
}

/// Sales per region as a filled radar chart.
///
/// The radial axis runs from zero to the largest regional total.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the chart cannot be serialized.
pub(super) fn region_radar_chart(records: &[&SalesRecord]) -> Result<Value, Error> {
    let totals = region_totals(records);
    let max = radial_max(totals.max());

    let indicators: Vec<Value> = Region::ALL
        .iter()
        .map(|region| json!({ "name": region.label(), "min": 0, "max": max }))
        .collect();
    let values: Vec<f64> = Region::ALL.iter().map(|&region| totals.get(region)).collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text("Region Sales Distribution")
                .left(20)
                .top("1%"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item));

    let mut options = serde_json::to_value(&chart)?;
    options["radar"] = json!({
        "indicator": indicators,
        "shape": "polygon",
        "center": ["50%", "55%"],
        "radius": "65%",
    });
    options["series"] = json!([{
        "type": "radar",
        "name": "Region Sales",
        "data": [{
            "name": UNITS_AXIS_NAME,
            "value": values,
            "areaStyle": {},
        }],
    }]);

    Ok(options)
}

/// Global sales per genre as bubbles sized by the number of releases.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the chart cannot be serialized.
pub(super) fn genre_bubble_chart(records: &[&SalesRecord]) -> Result<Value, Error> {
    let summaries = genre_summaries(records);
    let max_releases = summaries
        .iter()
        .map(|summary| summary.releases)
        .max()
        .unwrap_or(0);

    let genres: Vec<String> = summaries
        .iter()
        .map(|summary| summary.genre.clone())
        .collect();
    let points: Vec<Value> = summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| {
            json!({
                "name": summary.genre,
                "value": [index, summary.global_sales, summary.releases],
                "symbolSize": bubble_size(summary.releases, max_releases),
            })
        })
        .collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text("Genre Sales and Number of Releases")
                .left(20)
                .top("1%"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(50)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(genres))
        .y_axis(Axis::new().type_(AxisType::Value).name(UNITS_AXIS_NAME));

    let mut options = serde_json::to_value(&chart)?;
    options["series"] = json!([{
        "type": "scatter",
        "name": "Genres",
        "dimensions": ["Genre", UNITS_AXIS_NAME, "Released Games"],
        "data": points,
    }]);

    Ok(options)
}

/// Global sales per genre and console as a heatmap.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the chart cannot be serialized.
pub(super) fn genre_console_heatmap(records: &[&SalesRecord]) -> Result<Value, Error> {
    let matrix = sales_matrix(records);
    let max = radial_max(matrix.max());

    let cells: Vec<[Value; 3]> = matrix
        .values
        .iter()
        .enumerate()
        .flat_map(|(genre_index, row)| {
            row.iter()
                .enumerate()
                .map(move |(console_index, &sales)| {
                    [json!(console_index), json!(genre_index), json!(sales)]
                })
        })
        .collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text("Sales Heatmap by Genre and Console")
                .left(20)
                .top("1%"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .grid(
            Grid::new()
                .left("3%")
                .right("12%")
                .bottom("3%")
                .top(50)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Console")
                .data(matrix.consoles.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Genre")
                .data(matrix.genres.clone()),
        );

    let mut options = serde_json::to_value(&chart)?;
    options["visualMap"] = json!({
        "min": 0,
        "max": max,
        "calculable": true,
        "orient": "vertical",
        "right": 0,
        "top": "middle",
        "text": [UNITS_AXIS_NAME, ""],
    });
    options["series"] = json!([{
        "type": "heatmap",
        "name": UNITS_AXIS_NAME,
        "data": cells,
        "emphasis": { "itemStyle": { "borderColor": "#fff", "borderWidth": 1 } },
    }]);

    Ok(options)
}

/// Global sales per year over the whole dataset, naming the selected year.
pub(super) fn sales_trend_chart(
    all_records: &[SalesRecord],
    selected_year: i32,
    format: OptionsFormat,
) -> Chart {
    let (years, values): (Vec<String>, Vec<f64>) = yearly_global_sales(all_records)
        .into_iter()
        .map(|(year, sales)| (year.to_string(), sales))
        .unzip();

    Chart::new()
        .title(
            Title::new()
                .text("Global Sales by Year")
                .subtext(format!("Selected: {selected_year}"))
                .left(20)
                .top("1%"),
        )
        .tooltip(units_tooltip(format))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(years))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(UNITS_AXIS_NAME)
                .axis_label(units_axis_label(format)),
        )
        .series(Line::new().name("Global Sales").data(values))
}

/// The upper bound of a value axis, avoiding a zero-width range.
fn radial_max(max: f64) -> f64 {
    if max > 0.0 { max } else { 1.0 }
}

/// The bubble diameter for a genre, so that bubble area grows with the
/// number of releases.
fn bubble_size(releases: usize, max_releases: usize) -> f64 {
    if max_releases == 0 {
        return BUBBLE_MIN_SIZE;
    }

    let scaled = BUBBLE_MAX_SIZE * (releases as f64 / max_releases as f64).sqrt();
    scaled.max(BUBBLE_MIN_SIZE)
}

#[inline]
fn units_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "value",
        "return (value !== null && value !== undefined) ? value.toFixed(2) + 'M' : \"-\";",
    )
}

/// Creates a tooltip configuration for sales values
fn units_tooltip(format: OptionsFormat) -> Tooltip {
    let tooltip = Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow));

    match format {
        OptionsFormat::Script => tooltip.value_formatter(units_formatter()),
        OptionsFormat::Json => tooltip,
    }
}

fn units_axis_label(format: OptionsFormat) -> AxisLabel {
    match format {
        OptionsFormat::Script => AxisLabel::new().formatter(units_formatter()),
        OptionsFormat::Json => AxisLabel::new(),
    }
}
