//! The fixed set of chart panels shown on the dashboard.

use crate::{
    Error,
    dashboard::{
        aggregation::Category,
        charts::{
            DashboardChart, OptionsFormat, genre_bubble_chart, genre_console_heatmap,
            publisher_treemap, region_radar_chart, regional_sales_chart, sales_trend_chart,
            top_games_chart,
        },
    },
    dataset::SalesDataset,
};

/// A chart panel of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChartPanel {
    GenreSales,
    ConsoleSales,
    TopGames,
    PublisherTreemap,
    RegionRadar,
    GenreBubble,
    GenreConsoleHeatmap,
    SalesTrend,
}

impl ChartPanel {
    /// Every chart panel, in the order they are initialised.
    pub const ALL: [ChartPanel; 8] = [
        ChartPanel::GenreConsoleHeatmap,
        ChartPanel::TopGames,
        ChartPanel::RegionRadar,
        ChartPanel::PublisherTreemap,
        ChartPanel::ConsoleSales,
        ChartPanel::GenreSales,
        ChartPanel::GenreBubble,
        ChartPanel::SalesTrend,
    ];

    /// The HTML id of the panel's container.
    pub fn id(self) -> &'static str {
        match self {
            ChartPanel::GenreSales => "genre-sales-chart",
            ChartPanel::ConsoleSales => "console-sales-chart",
            ChartPanel::TopGames => "top-games-chart",
            ChartPanel::PublisherTreemap => "publisher-treemap",
            ChartPanel::RegionRadar => "region-radar",
            ChartPanel::GenreBubble => "genre-bubble-chart",
            ChartPanel::GenreConsoleHeatmap => "genre-console-heatmap",
            ChartPanel::SalesTrend => "sales-trend-chart",
        }
    }

    /// Looks up a panel by its HTML id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.id() == id)
    }

    fn height(self) -> &'static str {
        match self {
            ChartPanel::GenreConsoleHeatmap => "h-[540px]",
            ChartPanel::TopGames => "h-[300px]",
            ChartPanel::RegionRadar | ChartPanel::PublisherTreemap => "h-[420px]",
            ChartPanel::GenreSales
            | ChartPanel::ConsoleSales
            | ChartPanel::GenreBubble
            | ChartPanel::SalesTrend => "h-[280px]",
        }
    }

    /// The ECharts options of the panel for `year`, rendered in `format`.
    ///
    /// # Errors
    /// Returns [Error::UnknownYear] if `year` is not in `dataset`, or
    /// [Error::JSONSerializationError] if the options cannot be serialized.
    pub fn options(
        self,
        dataset: &SalesDataset,
        year: i32,
        format: OptionsFormat,
    ) -> Result<String, Error> {
        if !dataset.contains_year(year) {
            return Err(Error::UnknownYear(year));
        }

        let records = dataset.records_for_year(year);

        let options = match self {
            ChartPanel::GenreSales => format.render(&regional_sales_chart(
                "Number of Units Sold by Genre",
                Category::Genre,
                &records,
                format,
            ))?,
            ChartPanel::ConsoleSales => format.render(&regional_sales_chart(
                "Number of Units Sold by Console",
                Category::Console,
                &records,
                format,
            ))?,
            ChartPanel::TopGames => format.render(&top_games_chart(&records, format))?,
            ChartPanel::PublisherTreemap => publisher_treemap(&records)?.to_string(),
            ChartPanel::RegionRadar => region_radar_chart(&records)?.to_string(),
            ChartPanel::GenreBubble => genre_bubble_chart(&records)?.to_string(),
            ChartPanel::GenreConsoleHeatmap => genre_console_heatmap(&records)?.to_string(),
            ChartPanel::SalesTrend => {
                format.render(&sales_trend_chart(dataset.records(), year, format))?
            }
        };

        Ok(options)
    }

    fn chart(self, dataset: &SalesDataset, year: i32) -> Result<DashboardChart, Error> {
        Ok(DashboardChart {
            id: self.id(),
            height: self.height(),
            options: self.options(dataset, year, OptionsFormat::Script)?,
        })
    }
}

/// Builds every chart panel for `year`.
///
/// # Errors
/// Returns [Error::UnknownYear] if `year` is not in `dataset`, or
/// [Error::JSONSerializationError] if a chart cannot be serialized.
pub(super) fn build_charts(dataset: &SalesDataset, year: i32) -> Result<Vec<DashboardChart>, Error> {
    ChartPanel::ALL
        .into_iter()
        .map(|panel| panel.chart(dataset, year))
        .collect()
}
