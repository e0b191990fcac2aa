//! The year filter that drives every panel.
//!
//! The filter is shown as a slider on large screens and as a dropdown on
//! small screens. Both widgets send their current value on every change, so
//! the id of the widget that fired (htmx's `HX-Trigger` header) decides which
//! value is used.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{Error, dataset::SalesDataset, endpoints};

/// The element id of the year slider.
pub(super) const SLIDER_ID: &str = "year-slider";
/// The element id of the year dropdown.
pub(super) const DROPDOWN_ID: &str = "year-dropdown";

/// The query string sent by the year filter widgets and dashboard links.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct YearQuery {
    /// The value of the slider.
    pub slider: Option<i32>,
    /// The value of the dropdown.
    pub dropdown: Option<i32>,
    /// A year selected by a link, e.g. `/dashboard?year=2006`.
    pub year: Option<i32>,
}

/// Works out which year to display.
///
/// `trigger` is the id of the widget that fired, or `None` for a request that
/// was not made by a widget, such as the first page load.
///
/// # Errors
/// Returns [Error::UnknownYear] if the dropdown or `year` parameter names a
/// year that is not in the dataset. Slider values are snapped to the nearest
/// available year instead.
pub(super) fn resolve_year(
    trigger: Option<&str>,
    query: &YearQuery,
    dataset: &SalesDataset,
) -> Result<i32, Error> {
    let default_year = dataset.first_year();

    let explicit_year = match trigger {
        Some(SLIDER_ID) => {
            return Ok(query
                .slider
                .map(|value| dataset.snap_to_year(value))
                .unwrap_or(default_year));
        }
        Some(DROPDOWN_ID) => query.dropdown,
        Some(other) => {
            tracing::debug!("Ignoring year filter trigger from unknown element \"{other}\"");
            None
        }
        None => query.year,
    };

    match explicit_year {
        Some(year) if dataset.contains_year(year) => Ok(year),
        Some(year) => Err(Error::UnknownYear(year)),
        None => Ok(default_year),
    }
}

/// Renders the slider and dropdown with `selected_year` chosen.
pub(super) fn year_filter_view(years: &[i32], selected_year: i32) -> Markup {
    let first_year = years.first().copied().unwrap_or(selected_year);
    let last_year = years.last().copied().unwrap_or(selected_year);
    let panels_endpoint = endpoints::DASHBOARD_PANELS;

    html!(
        form
            id="year-filter"
            class="sticky top-0 z-40 w-[90%] mx-auto my-2.5 px-4 py-2
                rounded bg-gray-800/95 shadow-lg"
            onsubmit="return false;"
        {
            div class="hidden md:block"
            {
                label for=(SLIDER_ID) class="block mb-1 text-sm font-medium"
                {
                    "Year: " span class="font-bold" { (selected_year) }
                }

                input
                    type="range"
                    id=(SLIDER_ID)
                    name="slider"
                    min=(first_year)
                    max=(last_year)
                    step="1"
                    value=(selected_year)
                    list="year-marks"
                    hx-get=(panels_endpoint)
                    hx-trigger="change"
                    hx-include="#year-filter"
                    hx-target="#dashboard-content"
                    hx-target-error="#alert-container"
                    hx-swap="innerHTML"
                    class="w-full accent-blue-500 cursor-pointer"
                ;

                datalist id="year-marks"
                {
                    @for year in years {
                        option value=(year) label=(year) {}
                    }
                }

                div class="flex justify-between text-xs text-gray-400"
                {
                    span { (first_year) }
                    span { (last_year) }
                }
            }

            div class="md:hidden"
            {
                label for=(DROPDOWN_ID) class="block mb-1 text-sm font-medium" { "Year" }

                select
                    id=(DROPDOWN_ID)
                    name="dropdown"
                    hx-get=(panels_endpoint)
                    hx-trigger="change"
                    hx-include="#year-filter"
                    hx-target="#dashboard-content"
                    hx-target-error="#alert-container"
                    hx-swap="innerHTML"
                    class="block w-full p-2 rounded text-sm bg-gray-700
                        border border-gray-600 text-white"
                {
                    @for &year in years {
                        option value=(year) selected[year == selected_year] { (year) }
                    }
                }
            }
        }
    )
}
