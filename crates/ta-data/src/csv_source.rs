//! CSV tick loader.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use ta_core::{DataError, Num, Tick, TimeSeries};

/// Layout of the CSV rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvFormat {
    /// Header row with `date, open, high, low, close, volume` columns
    /// (common aliases accepted)
    #[default]
    Headered,
    /// MetaTrader 4 history export: no header,
    /// `date, time, open, high, low, close, volume`
    Mt4,
}

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: String,
    #[serde(alias = "High", alias = "high")]
    high: String,
    #[serde(alias = "Low", alias = "low")]
    low: String,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: String,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Mt4Record(String, String, String, String, String, String, Option<String>);

impl From<Mt4Record> for CsvRecord {
    fn from(r: Mt4Record) -> Self {
        Self {
            date: format!("{} {}", r.0, r.1),
            open: r.2,
            high: r.3,
            low: r.4,
            close: r.5,
            volume: r.6,
        }
    }
}

/// Loads a [`TimeSeries`] from a CSV file.
///
/// Rows may come in any order; they are sorted by time before the series is
/// built. Two rows with the same time fail with a series error. Prices are
/// parsed straight into [`Num`], never through a float.
#[derive(Debug, Clone)]
pub struct CsvTickLoader {
    path: PathBuf,
    format: CsvFormat,
    time_period: Duration,
    max_tick_count: usize,
}

impl CsvTickLoader {
    /// Loader for a headered file of daily ticks.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            format: CsvFormat::default(),
            time_period: Duration::days(1),
            max_tick_count: 0,
        })
    }

    pub fn with_format(mut self, format: CsvFormat) -> Self {
        self.format = format;
        self
    }

    /// Length of every tick's period. Row times are tick end times.
    pub fn with_time_period(mut self, time_period: Duration) -> Self {
        self.time_period = time_period;
        self
    }

    /// Keep at most `max_tick_count` ticks (0 = unlimited).
    pub fn with_max_tick_count(mut self, max_tick_count: usize) -> Self {
        self.max_tick_count = max_tick_count;
        self
    }

    /// Series name derived from the file stem.
    pub fn series_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "series".to_string())
    }

    /// Load the whole file.
    pub fn load(&self) -> Result<TimeSeries, DataError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::NoDataAvailable(format!("{}: {e}", self.path.display())))?;
        self.load_from_reader(file, self.series_name())
    }

    /// Load ticks from any reader holding CSV text.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        name: impl Into<String>,
    ) -> Result<TimeSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.format == CsvFormat::Headered)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records: Vec<CsvRecord> = match self.format {
            CsvFormat::Headered => reader
                .deserialize()
                .collect::<Result<_, _>>()
                .map_err(|e| DataError::Parse(e.to_string()))?,
            CsvFormat::Mt4 => reader
                .deserialize::<Mt4Record>()
                .map(|r| r.map(CsvRecord::from))
                .collect::<Result<_, _>>()
                .map_err(|e| DataError::Parse(e.to_string()))?,
        };

        let mut ticks = records
            .into_iter()
            .map(|record| self.tick(record))
            .collect::<Result<Vec<_>, _>>()?;
        ticks.sort_by_key(|t| t.end_time());

        let mut series = TimeSeries::with_max_tick_count(name, self.max_tick_count);
        series.extend(ticks)?;
        tracing::info!(
            series = series.name(),
            ticks = series.tick_count(),
            period = %series.period_name(),
            "Loaded CSV series"
        );
        Ok(series)
    }

    fn tick(&self, record: CsvRecord) -> Result<Tick, DataError> {
        let volume = match record.volume.as_deref() {
            Some(v) if !v.is_empty() => parse_num(v, "volume")?,
            _ => Num::ZERO,
        };
        Ok(Tick::new(
            self.time_period,
            parse_time(&record.date)?,
            parse_num(&record.open, "open")?,
            parse_num(&record.high, "high")?,
            parse_num(&record.low, "low")?,
            parse_num(&record.close, "close")?,
            volume,
        ))
    }
}

fn parse_num(text: &str, column: &str) -> Result<Num, DataError> {
    text.parse::<Num>()
        .map_err(|e| DataError::Parse(format!("invalid {column} value {text:?}: {e}")))
}

/// Parse various timestamp formats.
fn parse_time(text: &str) -> Result<DateTime<Utc>, DataError> {
    const FORMATS: [&str; 7] = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d",
        "%Y.%m.%d %H:%M",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.and_utc());
        }
        if let Some(dt) = NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt.and_utc());
        }
    }

    // Unix timestamp; milliseconds if > 10 digits
    if let Ok(ts) = text.parse::<i64>() {
        let parsed = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = parsed {
            return Ok(dt);
        }
    }

    Err(DataError::Parse(format!("Could not parse date: {text}")))
}
