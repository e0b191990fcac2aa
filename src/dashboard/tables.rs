//! Table views for dashboard data display.
//!
//! Provides the summary table of the selected year.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::YearSummary,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_units},
};

/// The HTML id of the summary table panel.
pub(super) const YEAR_SUMMARY_ID: &str = "year-summary";

const TABLE_LABEL_CELL_STYLE: &str = "px-4 py-3 font-medium text-white whitespace-nowrap";
const TABLE_VALUE_CELL_STYLE: &str = "px-4 py-3 text-right whitespace-nowrap";

/// Renders a table with the headline figures of `year`.
pub(super) fn year_summary_table(summary: &YearSummary, year: i32) -> Markup {
    let leaders = [
        ("Best Selling Game", &summary.best_seller),
        ("Top Genre", &summary.top_genre),
        ("Top Console", &summary.top_console),
        ("Top Publisher", &summary.top_publisher),
    ];

    html! {
        div id=(YEAR_SUMMARY_ID) class="overflow-x-auto rounded"
        {
            table class="w-full text-sm text-left text-gray-400"
            {
                caption class="p-4 text-lg font-semibold text-left text-white"
                {
                    "Summary for " (year)
                }

                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Units Sold" }
                    }
                }

                tbody
                {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        th scope="row" class=(TABLE_LABEL_CELL_STYLE) { "Total" }
                        td class=(TABLE_CELL_STYLE)
                        {
                            (summary.releases)
                            @if summary.releases == 1 { " game" } @else { " games" }
                        }
                        td class=(TABLE_VALUE_CELL_STYLE) { (format_units(summary.total_units)) }
                    }

                    @for (label, leader) in leaders {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class=(TABLE_LABEL_CELL_STYLE) { (label) }

                            @match leader {
                                Some((name, units)) => {
                                    td class=(TABLE_CELL_STYLE) { (name) }
                                    td class=(TABLE_VALUE_CELL_STYLE) { (format_units(*units)) }
                                }
                                None => {
                                    td class=(TABLE_CELL_STYLE) { "-" }
                                    td class=(TABLE_VALUE_CELL_STYLE) { "-" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::dashboard::aggregation::YearSummary;

    use super::year_summary_table;

    fn cell_texts(html: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        html.select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn renders_totals_and_leaders() {
        let summary = YearSummary {
            total_units: 143.76,
            releases: 3,
            best_seller: Some(("Wii Sports".to_owned(), 82.74)),
            top_genre: Some(("Sports".to_owned(), 82.74)),
            top_console: Some(("Wii".to_owned(), 111.75)),
            top_publisher: Some(("Nintendo".to_owned(), 143.76)),
        };

        let html = Html::parse_fragment(&year_summary_table(&summary, 2006).into_string());

        let caption = Selector::parse("caption").unwrap();
        let caption_text: String = html.select(&caption).next().unwrap().text().collect();
        assert!(caption_text.contains("2006"));

        let rows = cell_texts(&html);
        assert_eq!(rows[0], ["Total", "3 games", "143.76M"]);
        assert_eq!(rows[1], ["Best Selling Game", "Wii Sports", "82.74M"]);
        assert_eq!(rows[4], ["Top Publisher", "Nintendo", "143.76M"]);
    }

    #[test]
    fn renders_placeholders_without_records() {
        let summary = YearSummary::default();

        let html = Html::parse_fragment(&year_summary_table(&summary, 1980).into_string());

        let rows = cell_texts(&html);
        assert_eq!(rows[0], ["Total", "0 games", "0.00M"]);
        assert_eq!(rows[2], ["Top Genre", "-", "-"]);
    }
}
