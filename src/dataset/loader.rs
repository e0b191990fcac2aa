//! Parses the sales table from CSV.

use std::io::Read;

use serde::Deserialize;

use crate::{Error, dataset::record::SalesRecord};

/// The raw CSV row. Columns are matched by header name, so column order does
/// not matter and extra columns such as `Rank` are ignored.
#[derive(Debug, Deserialize)]
struct SalesRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Console", alias = "Platform")]
    console: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Publisher")]
    publisher: String,
    #[serde(rename = "NA", alias = "NA_Sales")]
    na: f64,
    #[serde(rename = "EU", alias = "EU_Sales")]
    eu: f64,
    #[serde(rename = "JP", alias = "JP_Sales")]
    jp: f64,
    #[serde(rename = "Other", alias = "Other_Sales")]
    other: f64,
    #[serde(rename = "Global_Sales")]
    global_sales: f64,
}

/// The records parsed from a CSV file.
#[derive(Debug)]
pub(super) struct ParsedRecords {
    pub records: Vec<SalesRecord>,
    /// The number of rows dropped because they had no year.
    pub skipped_rows: usize,
}

/// Parses sales records from CSV text with a header row.
///
/// Rows without a year (an empty cell or "N/A") are skipped and counted.
///
/// # Errors
/// Returns [Error::InvalidCSV], naming the line of the offending row, if a row
/// is missing a column, has a sales figure that is not a number or has a year
/// that is not a whole number.
pub(super) fn parse_sales_csv<R: Read>(reader: R) -> Result<ParsedRecords, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .clone();

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    let mut record = csv::StringRecord::new();

    while csv_reader
        .read_record(&mut record)
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
    {
        let line = record.position().map_or(0, |position| position.line());
        let row: SalesRow = record
            .deserialize(Some(&headers))
            .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))?;

        let year = match parse_year(&row.year) {
            Ok(Some(year)) => year,
            Ok(None) => {
                tracing::debug!("Skipping \"{}\" ({}): no release year", row.name, row.console);
                skipped_rows += 1;
                continue;
            }
            Err(error) => {
                return Err(Error::InvalidCSV(format!(
                    "line {line}: invalid year for \"{}\" ({}): {error}",
                    row.name, row.console
                )));
            }
        };

        records.push(SalesRecord {
            name: row.name,
            console: row.console,
            year,
            genre: row.genre,
            publisher: row.publisher,
            na: row.na,
            eu: row.eu,
            jp: row.jp,
            other: row.other,
            global_sales: row.global_sales,
        });
    }

    Ok(ParsedRecords {
        records,
        skipped_rows,
    })
}

/// Parses a year cell.
///
/// Spreadsheet exports often write years as floats, so "2006.0" is accepted
/// alongside "2006". Returns `Ok(None)` for a missing year.
fn parse_year(text: &str) -> Result<Option<i32>, String> {
    let text = text.trim();

    if text.is_empty() || text.eq_ignore_ascii_case("N/A") || text.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    if let Ok(year) = text.parse::<i32>() {
        return Ok(Some(year));
    }

    match text.parse::<f64>() {
        Ok(year) if year.fract() == 0.0 && year.abs() <= i32::MAX as f64 => Ok(Some(year as i32)),
        Ok(_) => Err(format!("\"{text}\" is not a whole year")),
        Err(_) => Err(format!("\"{text}\" is not a number")),
    }
}
