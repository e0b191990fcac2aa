//! Grouping and summing of sales records for the dashboard panels.
//!
//! Every function takes the records of the selected year, groups them by a
//! categorical column and sums one or more sales columns. Groups are ordered
//! by their key so that charts list categories alphabetically.

use std::collections::BTreeMap;

use crate::dataset::{Region, SalesRecord};

/// A categorical column of the sales table that records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Category {
    Name,
    Console,
    Genre,
    Publisher,
}

impl Category {
    /// The value of this column for `record`.
    pub fn of(self, record: &SalesRecord) -> &str {
        match self {
            Category::Name => &record.name,
            Category::Console => &record.console,
            Category::Genre => &record.genre,
            Category::Publisher => &record.publisher,
        }
    }
}

/// Sales summed per region, indexed in the order of [Region::ALL].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct RegionalTotals([f64; 4]);

impl RegionalTotals {
    fn add(&mut self, record: &SalesRecord) {
        for (total, region) in self.0.iter_mut().zip(Region::ALL) {
            *total += record.sales_in(region);
        }
    }

    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::NorthAmerica => self.0[0],
            Region::Europe => self.0[1],
            Region::Japan => self.0[2],
            Region::Other => self.0[3],
        }
    }

    /// The largest regional total, or zero if there are no sales.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }
}

/// Total global sales and the number of titles released for one genre.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct GenreSummary {
    pub genre: String,
    pub global_sales: f64,
    pub releases: usize,
}

/// Global sales pivoted by genre (rows) and console (columns).
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SalesMatrix {
    pub genres: Vec<String>,
    pub consoles: Vec<String>,
    /// `values[genre][console]`, zero where a genre had no releases on a console.
    pub values: Vec<Vec<f64>>,
}

impl SalesMatrix {
    /// The largest cell, or zero for an empty matrix.
    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// The headline numbers of the selected year.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct YearSummary {
    pub total_units: f64,
    pub releases: usize,
    pub best_seller: Option<(String, f64)>,
    pub top_genre: Option<(String, f64)>,
    pub top_console: Option<(String, f64)>,
    pub top_publisher: Option<(String, f64)>,
}

fn group_by<'a, T: Default>(
    records: &[&'a SalesRecord],
    category: Category,
    mut add: impl FnMut(&mut T, &SalesRecord),
) -> BTreeMap<&'a str, T> {
    let mut groups = BTreeMap::new();

    for &record in records {
        add(groups.entry(category.of(record)).or_default(), record);
    }

    groups
}

/// Sums the regional sales columns per group of `category`.
pub(super) fn regional_sales_by(
    records: &[&SalesRecord],
    category: Category,
) -> Vec<(String, RegionalTotals)> {
    group_by(records, category, RegionalTotals::add)
        .into_iter()
        .map(|(key, totals)| (key.to_owned(), totals))
        .collect()
}

/// Sums global sales per group of `category`.
pub(super) fn global_sales_by(records: &[&SalesRecord], category: Category) -> Vec<(String, f64)> {
    group_by(records, category, |total: &mut f64, record| {
        *total += record.global_sales
    })
    .into_iter()
    .map(|(key, total)| (key.to_owned(), total))
    .collect()
}

/// The `n` largest totals in descending order.
///
/// Groups with equal totals keep their original (alphabetical) order.
pub(super) fn top_n(mut totals: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    totals.truncate(n);
    totals
}

/// Sums each regional sales column over all `records`.
pub(super) fn region_totals(records: &[&SalesRecord]) -> RegionalTotals {
    let mut totals = RegionalTotals::default();

    for record in records {
        totals.add(record);
    }

    totals
}

/// Sums global sales and counts releases per genre.
pub(super) fn genre_summaries(records: &[&SalesRecord]) -> Vec<GenreSummary> {
    group_by(
        records,
        Category::Genre,
        |(sales, releases): &mut (f64, usize), record| {
            *sales += record.global_sales;
            *releases += 1;
        },
    )
    .into_iter()
    .map(|(genre, (global_sales, releases))| GenreSummary {
        genre: genre.to_owned(),
        global_sales,
        releases,
    })
    .collect()
}

/// Pivots global sales into a genre by console matrix.
pub(super) fn sales_matrix(records: &[&SalesRecord]) -> SalesMatrix {
    let mut cells: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    let mut genres: Vec<&str> = Vec::new();
    let mut consoles: Vec<&str> = Vec::new();

    for record in records {
        *cells
            .entry((record.genre.as_str(), record.console.as_str()))
            .or_insert(0.0) += record.global_sales;
        genres.push(&record.genre);
        consoles.push(&record.console);
    }

    genres.sort_unstable();
    genres.dedup();
    consoles.sort_unstable();
    consoles.dedup();

    let values = genres
        .iter()
        .map(|&genre| {
            consoles
                .iter()
                .map(|&console| cells.get(&(genre, console)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    SalesMatrix {
        genres: genres.into_iter().map(str::to_owned).collect(),
        consoles: consoles.into_iter().map(str::to_owned).collect(),
        values,
    }
}

/// Sums global sales per year over the whole table, in ascending year order.
pub(super) fn yearly_global_sales(records: &[SalesRecord]) -> Vec<(i32, f64)> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();

    for record in records {
        *totals.entry(record.year).or_insert(0.0) += record.global_sales;
    }

    totals.into_iter().collect()
}

/// Calculates the headline numbers for the records of one year.
pub(super) fn year_summary(records: &[&SalesRecord]) -> YearSummary {
    let top = |category| top_n(global_sales_by(records, category), 1).into_iter().next();

    YearSummary {
        total_units: records.iter().map(|record| record.global_sales).sum(),
        releases: records.len(),
        best_seller: top(Category::Name),
        top_genre: top(Category::Genre),
        top_console: top(Category::Console),
        top_publisher: top(Category::Publisher),
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::{Region, SalesRecord};

    use super::{
        Category, GenreSummary, genre_summaries, global_sales_by, region_totals,
        regional_sales_by, sales_matrix, top_n, year_summary, yearly_global_sales,
    };

    fn test_records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::build("Wii Sports", 2006)
                .console("Wii")
                .genre("Sports")
                .sales(41.49, 29.02, 3.77, 8.46),
            SalesRecord::build("New Super Mario Bros.", 2006)
                .console("DS")
                .genre("Platform")
                .sales(11.38, 9.23, 6.5, 2.9),
            SalesRecord::build("Wii Play", 2006)
                .console("Wii")
                .genre("Misc")
                .sales(14.03, 9.2, 2.93, 2.85),
            SalesRecord::build("Madden NFL 07", 2006)
                .console("PS2")
                .genre("Sports")
                .publisher("Electronic Arts")
                .sales(3.63, 0.24, 0.01, 0.61),
        ]
    }

    fn as_refs(records: &[SalesRecord]) -> Vec<&SalesRecord> {
        records.iter().collect()
    }

    #[track_caller]
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn regional_sales_by_genre_sums_each_region() {
        let records = test_records();

        let result = regional_sales_by(&as_refs(&records), Category::Genre);

        let genres: Vec<_> = result.iter().map(|(genre, _)| genre.as_str()).collect();
        assert_eq!(genres, ["Misc", "Platform", "Sports"]);

        let (_, sports) = &result[2];
        assert_close(sports.get(Region::NorthAmerica), 41.49 + 3.63);
        assert_close(sports.get(Region::Europe), 29.02 + 0.24);
        assert_close(sports.get(Region::Japan), 3.77 + 0.01);
        assert_close(sports.get(Region::Other), 8.46 + 0.61);
    }

    #[test]
    fn regional_sales_by_console_groups_by_console() {
        let records = test_records();

        let result = regional_sales_by(&as_refs(&records), Category::Console);

        let consoles: Vec<_> = result.iter().map(|(console, _)| console.as_str()).collect();
        assert_eq!(consoles, ["DS", "PS2", "Wii"]);
        assert_close(result[2].1.get(Region::NorthAmerica), 41.49 + 14.03);
    }

    #[test]
    fn global_sales_by_publisher() {
        let records = test_records();

        let result = global_sales_by(&as_refs(&records), Category::Publisher);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, "Electronic Arts");
        assert_close(result[0].1, 4.49);
        assert_eq!(result[1].0, "Nintendo");
    }

    #[test]
    fn aggregations_handle_empty_input() {
        assert!(regional_sales_by(&[], Category::Genre).is_empty());
        assert!(global_sales_by(&[], Category::Name).is_empty());
        assert!(genre_summaries(&[]).is_empty());
        assert_eq!(region_totals(&[]).max(), 0.0);
        assert_eq!(sales_matrix(&[]).max(), 0.0);
    }

    #[test]
    fn top_n_returns_largest_descending() {
        let totals = vec![
            ("A".to_owned(), 1.0),
            ("B".to_owned(), 5.0),
            ("C".to_owned(), 3.0),
            ("D".to_owned(), 4.0),
        ];

        let result = top_n(totals, 2);

        assert_eq!(result, [("B".to_owned(), 5.0), ("D".to_owned(), 4.0)]);
    }

    #[test]
    fn top_n_keeps_key_order_for_ties() {
        let totals = vec![
            ("A".to_owned(), 2.0),
            ("B".to_owned(), 2.0),
            ("C".to_owned(), 2.0),
        ];

        let result = top_n(totals, 2);

        assert_eq!(result, [("A".to_owned(), 2.0), ("B".to_owned(), 2.0)]);
    }

    #[test]
    fn top_n_with_fewer_groups_than_n() {
        let totals = vec![("A".to_owned(), 2.0)];

        assert_eq!(top_n(totals, 5).len(), 1);
    }

    #[test]
    fn region_totals_sums_all_records() {
        let records = test_records();

        let totals = region_totals(&as_refs(&records));

        assert_close(totals.get(Region::NorthAmerica), 41.49 + 11.38 + 14.03 + 3.63);
        assert_close(totals.get(Region::Japan), 3.77 + 6.5 + 2.93 + 0.01);
        assert_close(totals.max(), totals.get(Region::NorthAmerica));
    }

    #[test]
    fn genre_summaries_count_releases() {
        let records = test_records();

        let result = genre_summaries(&as_refs(&records));

        assert_eq!(result.len(), 3);
        assert_eq!(
            result[0],
            GenreSummary {
                genre: "Misc".to_owned(),
                global_sales: records[2].global_sales,
                releases: 1,
            }
        );
        assert_eq!(result[2].genre, "Sports");
        assert_eq!(result[2].releases, 2);
        assert_close(
            result[2].global_sales,
            records[0].global_sales + records[3].global_sales,
        );
    }

    #[test]
    fn sales_matrix_fills_missing_cells_with_zero() {
        let records = test_records();

        let matrix = sales_matrix(&as_refs(&records));

        assert_eq!(matrix.genres, ["Misc", "Platform", "Sports"]);
        assert_eq!(matrix.consoles, ["DS", "PS2", "Wii"]);
        // Misc only has a Wii release.
        assert_eq!(matrix.values[0][0], 0.0);
        assert_eq!(matrix.values[0][1], 0.0);
        assert_close(matrix.values[0][2], records[2].global_sales);
        // Sports has releases on PS2 and Wii.
        assert_close(matrix.values[2][1], records[3].global_sales);
        assert_close(matrix.values[2][2], records[0].global_sales);
        assert_close(matrix.max(), records[0].global_sales);
    }

    #[test]
    fn yearly_global_sales_orders_by_year() {
        let records = vec![
            SalesRecord::build("Wii Sports", 2006).sales(1.0, 0.0, 0.0, 0.0),
            SalesRecord::build("Super Mario Bros.", 1985).sales(2.0, 0.0, 0.0, 0.0),
            SalesRecord::build("Wii Play", 2006).sales(3.0, 0.0, 0.0, 0.0),
        ];

        let result = yearly_global_sales(&records);

        assert_eq!(result, [(1985, 2.0), (2006, 4.0)]);
    }

    #[test]
    fn year_summary_picks_top_groups() {
        let records = test_records();

        let summary = year_summary(&as_refs(&records));

        assert_eq!(summary.releases, 4);
        assert_close(
            summary.total_units,
            records.iter().map(|record| record.global_sales).sum(),
        );
        assert_eq!(summary.best_seller.unwrap().0, "Wii Sports");
        assert_eq!(summary.top_genre.unwrap().0, "Sports");
        assert_eq!(summary.top_console.unwrap().0, "Wii");
        assert_eq!(summary.top_publisher.unwrap().0, "Nintendo");
    }

    #[test]
    fn year_summary_of_no_records_is_empty() {
        let summary = year_summary(&[]);

        assert_eq!(summary.releases, 0);
        assert_eq!(summary.total_units, 0.0);
        assert!(summary.best_seller.is_none());
    }
}
