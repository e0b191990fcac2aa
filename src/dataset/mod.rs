//! The read-only table of video-game sales records.
//!
//! The table is loaded once when the server starts and then shared by every
//! request handler. All dashboard panels are computed from the rows of a
//! single year, see [SalesDataset::records_for_year].

mod loader;
mod record;

use std::{collections::BTreeSet, fs::File, io::Read, path::Path};

pub use record::{Region, SalesRecord};

use crate::{Error, dataset::loader::parse_sales_csv};

/// The sales table and the years it covers.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
    /// Distinct years in ascending order, never empty.
    years: Vec<i32>,
}

impl SalesDataset {
    /// Load the dataset from the CSV file at `path`.
    ///
    /// # Errors
    /// Returns [Error::DatasetIo] if the file cannot be opened, otherwise see
    /// [SalesDataset::from_reader].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| {
            Error::DatasetIo(format!("could not open {}: {error}", path.display()))
        })?;

        let dataset = Self::from_reader(file)?;

        tracing::info!(
            "Loaded {} sales records covering {}-{} from {}",
            dataset.records.len(),
            dataset.first_year(),
            dataset.last_year(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse the dataset from CSV data with a header row.
    ///
    /// # Errors
    /// Returns [Error::InvalidCSV] if a row cannot be parsed, or
    /// [Error::EmptyDataset] if no row has a release year.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let parsed = parse_sales_csv(reader)?;

        if parsed.skipped_rows > 0 {
            tracing::warn!(
                "Skipped {} rows with no release year",
                parsed.skipped_rows
            );
        }

        Self::from_records(parsed.records)
    }

    /// Create a dataset from parsed records.
    ///
    /// # Errors
    /// Returns [Error::EmptyDataset] if `records` is empty.
    pub fn from_records(records: Vec<SalesRecord>) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let years: BTreeSet<i32> = records.iter().map(|record| record.year).collect();

        Ok(Self {
            records,
            years: years.into_iter().collect(),
        })
    }

    /// Every record in the table.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// The distinct years in the table in ascending order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// The earliest year in the table, which is also the default selection.
    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    /// The latest year in the table.
    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    /// Whether at least one record was released in `year`.
    pub fn contains_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// The records released in `year`.
    pub fn records_for_year(&self, year: i32) -> Vec<&SalesRecord> {
        self.records
            .iter()
            .filter(|record| record.year == year)
            .collect()
    }

    /// The available year closest to `value`.
    ///
    /// The slider can produce any integer between the first and last year,
    /// but the table may have gaps. Ties go to the earlier year.
    pub fn snap_to_year(&self, value: i32) -> i32 {
        match self.years.binary_search(&value) {
            Ok(_) => value,
            Err(0) => self.years[0],
            Err(index) if index == self.years.len() => self.years[index - 1],
            Err(index) => {
                let below = self.years[index - 1];
                let above = self.years[index];

                if value - below <= above - value {
                    below
                } else {
                    above
                }
            }
        }
    }
}
