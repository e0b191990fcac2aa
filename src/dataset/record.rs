//! The row type of the sales table and the sales regions it reports on.

/// One row of the sales table.
///
/// All sales figures are in millions of units.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// The title of the game.
    pub name: String,
    /// The console (platform) the game was released on.
    pub console: String,
    /// The year of release.
    pub year: i32,
    /// The genre of the game, e.g. "Sports".
    pub genre: String,
    /// The publisher of the game.
    pub publisher: String,
    /// Sales in North America.
    pub na: f64,
    /// Sales in Europe.
    pub eu: f64,
    /// Sales in Japan.
    pub jp: f64,
    /// Sales in the rest of the world.
    pub other: f64,
    /// Worldwide sales.
    pub global_sales: f64,
}

impl SalesRecord {
    /// The sales figure for `region`.
    pub fn sales_in(&self, region: Region) -> f64 {
        match region {
            Region::NorthAmerica => self.na,
            Region::Europe => self.eu,
            Region::Japan => self.jp,
            Region::Other => self.other,
        }
    }

    #[cfg(test)]
    pub(crate) fn build(name: &str, year: i32) -> Self {
        Self {
            name: name.to_owned(),
            console: "Wii".to_owned(),
            year,
            genre: "Sports".to_owned(),
            publisher: "Nintendo".to_owned(),
            na: 0.0,
            eu: 0.0,
            jp: 0.0,
            other: 0.0,
            global_sales: 0.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn console(mut self, console: &str) -> Self {
        self.console = console.to_owned();
        self
    }

    #[cfg(test)]
    pub(crate) fn genre(mut self, genre: &str) -> Self {
        self.genre = genre.to_owned();
        self
    }

    #[cfg(test)]
    pub(crate) fn publisher(mut self, publisher: &str) -> Self {
        self.publisher = publisher.to_owned();
        self
    }

    /// Sets the regional sales in the order NA, EU, JP, Other and the global
    /// sales to their sum.
    #[cfg(test)]
    pub(crate) fn sales(mut self, na: f64, eu: f64, jp: f64, other: f64) -> Self {
        self.na = na;
        self.eu = eu;
        self.jp = jp;
        self.other = other;
        self.global_sales = na + eu + jp + other;
        self
    }
}

/// A sales region of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// North America, the `NA` column.
    NorthAmerica,
    /// Europe, the `EU` column.
    Europe,
    /// Japan, the `JP` column.
    Japan,
    /// The rest of the world, the `Other` column.
    Other,
}

impl Region {
    /// Every region in the order the charts display them.
    pub const ALL: [Region; 4] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Japan,
        Region::Other,
    ];

    /// The short label used as the column name and chart legend.
    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA",
            Region::Europe => "EU",
            Region::Japan => "JP",
            Region::Other => "Other",
        }
    }
}
