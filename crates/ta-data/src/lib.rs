//! Tick series loading.

mod csv_source;

pub use csv_source::{CsvFormat, CsvTickLoader};

use ta_core::{DataError, TimeSeries};

/// Load a daily series from a headered CSV file, named after the file stem.
pub fn load_csv(path: &str) -> Result<TimeSeries, DataError> {
    CsvTickLoader::new(path)?.load()
}
