//! Time series of ticks.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::error::SeriesError;
use crate::num::Num;

use super::Tick;

/// Chronologically ordered ticks for one instrument.
///
/// Indices are absolute: when a maximum tick count is set and the oldest
/// ticks are dropped, `begin_index` advances but every remaining tick keeps
/// the index it was inserted at.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    name: String,
    ticks: VecDeque<Tick>,
    /// Ticks dropped from the front so far
    removed: usize,
    /// Maximum number of retained ticks (0 = unlimited)
    max_tick_count: usize,
}

impl TimeSeries {
    /// Create a new empty series.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticks: VecDeque::new(),
            removed: 0,
            max_tick_count: 0,
        }
    }

    /// Create a series that retains at most `max_tick_count` ticks.
    /// When the limit is reached, the oldest tick is removed.
    pub fn with_max_tick_count(name: impl Into<String>, max_tick_count: usize) -> Self {
        Self {
            name: name.into(),
            ticks: VecDeque::with_capacity(max_tick_count),
            removed: 0,
            max_tick_count,
        }
    }

    /// Build a series from ticks already in chronological order.
    pub fn from_ticks(
        name: impl Into<String>,
        ticks: impl IntoIterator<Item = Tick>,
    ) -> Result<Self, SeriesError> {
        let mut series = Self::new(name);
        series.extend(ticks)?;
        Ok(series)
    }

    /// Append a tick. Its end time must be strictly after the last tick's.
    pub fn add_tick(&mut self, tick: Tick) -> Result<(), SeriesError> {
        if let Some(last) = self.ticks.back() {
            if tick.end_time() <= last.end_time() {
                return Err(SeriesError::NonChronological {
                    end_time: tick.end_time().to_rfc3339(),
                    last_end_time: last.end_time().to_rfc3339(),
                });
            }
        }
        if self.max_tick_count > 0 && self.ticks.len() >= self.max_tick_count {
            self.ticks.pop_front();
            self.removed += 1;
        }
        self.ticks.push_back(tick);
        Ok(())
    }

    /// Append several ticks, stopping at the first out-of-order one.
    pub fn extend(&mut self, ticks: impl IntoIterator<Item = Tick>) -> Result<(), SeriesError> {
        for tick in ticks {
            self.add_tick(tick)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of retained ticks.
    #[inline]
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn max_tick_count(&self) -> usize {
        self.max_tick_count
    }

    /// First valid index.
    #[inline]
    pub fn begin_index(&self) -> usize {
        self.removed
    }

    /// Last valid index, `None` for an empty series.
    #[inline]
    pub fn end_index(&self) -> Option<usize> {
        (!self.ticks.is_empty()).then(|| self.removed + self.ticks.len() - 1)
    }

    /// The valid index window, `None` for an empty series.
    pub fn index_range(&self) -> Option<RangeInclusive<usize>> {
        self.end_index().map(|end| self.begin_index()..=end)
    }

    /// Fail with [`SeriesError::IndexOutOfRange`] unless `index` is in the window.
    pub fn check_index(&self, index: usize) -> Result<(), SeriesError> {
        match self.end_index() {
            Some(end) if index >= self.removed && index <= end => Ok(()),
            end => Err(SeriesError::IndexOutOfRange {
                index,
                begin: self.removed,
                end,
            }),
        }
    }

    /// Tick at an absolute index.
    pub fn tick(&self, index: usize) -> Result<&Tick, SeriesError> {
        self.check_index(index)?;
        Ok(&self.ticks[index - self.removed])
    }

    pub fn first_tick(&self) -> Option<&Tick> {
        self.ticks.front()
    }

    pub fn last_tick(&self) -> Option<&Tick> {
        self.ticks.back()
    }

    /// Iterate over `(index, tick)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tick)> {
        let begin = self.removed;
        self.ticks.iter().enumerate().map(move |(i, t)| (begin + i, t))
    }

    /// Close prices of the retained ticks.
    pub fn closes(&self) -> Vec<Num> {
        self.ticks.iter().map(Tick::close).collect()
    }

    /// Human readable period, e.g. `2024-01-01T00:00:00+00:00 - 2024-03-01T00:00:00+00:00`.
    pub fn period_name(&self) -> String {
        match (self.first_tick(), self.last_tick()) {
            (Some(first), Some(last)) => format!(
                "{} - {}",
                first.end_time().to_rfc3339(),
                last.end_time().to_rfc3339()
            ),
            _ => String::new(),
        }
    }
}
