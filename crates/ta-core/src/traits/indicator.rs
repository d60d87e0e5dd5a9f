//! Indicator trait and the per-indicator value cache.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::IndicatorError;
use crate::num::Num;
use crate::types::TimeSeries;

/// A named function from series index to value.
///
/// Implementations own their upstream indicators as [`SharedIndicator`]
/// handles, so an indicator graph is a DAG built bottom-up: an indicator
/// can only reference indicators that existed when it was constructed.
///
/// `value` fails with `IndicatorError::Series` when `index` lies outside
/// the owning series' window. Derived indicators memoize through a
/// [`ValueCache`], so repeated calls with the same index return equal
/// values and compute them once.
pub trait Indicator {
    /// Value at an absolute series index.
    fn value(&self, index: usize) -> Result<Num, IndicatorError>;

    /// The series this indicator is computed over.
    fn series(&self) -> &Rc<TimeSeries>;

    /// Display name, e.g. `SMA(20)`.
    fn name(&self) -> String;

    /// Values over the series' whole window, in index order.
    fn values(&self) -> Result<Vec<Num>, IndicatorError> {
        match self.series().index_range() {
            Some(range) => range.map(|i| self.value(i)).collect(),
            None => Ok(Vec::new()),
        }
    }
}

/// Shared handle to an indicator node.
///
/// `Rc` rather than `Arc`: caches use `RefCell`, so a graph stays on the
/// thread that built it.
pub type SharedIndicator = Rc<dyn Indicator>;

impl fmt::Debug for dyn Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Index-keyed memo of computed values, private to one indicator instance.
///
/// Errors are never cached; only successfully computed values are.
#[derive(Debug, Default)]
pub struct ValueCache {
    values: RefCell<Vec<Option<Num>>>,
    computed: Cell<usize>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Num> {
        self.values.borrow().get(index).copied().flatten()
    }

    /// Store the value for `index`.
    pub fn insert(&self, index: usize, value: Num) {
        let mut values = self.values.borrow_mut();
        if values.len() <= index {
            values.resize(index + 1, None);
        }
        if values[index].is_none() {
            self.computed.set(self.computed.get() + 1);
        }
        values[index] = Some(value);
    }

    /// Return the cached value at `index` or compute, store and return it.
    ///
    /// The cache is not borrowed while `compute` runs, so it may evaluate
    /// upstream indicators freely.
    pub fn get_or_try_insert_with<F>(&self, index: usize, compute: F) -> Result<Num, IndicatorError>
    where
        F: FnOnce() -> Result<Num, IndicatorError>,
    {
        if let Some(value) = self.get(index) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(index, value);
        Ok(value)
    }

    /// Most recent cached entry in `[from, index]`.
    pub fn last_cached(&self, from: usize, index: usize) -> Option<(usize, Num)> {
        let values = self.values.borrow();
        let upper = index.min(values.len().checked_sub(1)?);
        if upper < from {
            return None;
        }
        (from..=upper)
            .rev()
            .find_map(|i| values[i].map(|value| (i, value)))
    }

    /// Number of distinct indices computed so far.
    pub fn computed_count(&self) -> usize {
        self.computed.get()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
        self.computed.set(0);
    }
}
