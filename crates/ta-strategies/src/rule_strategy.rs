//! Strategy built from an entry rule and an exit rule.

use ta_core::{BoxedRule, IndicatorError, Rule, Strategy, TradingRecord};

/// Enters when the entry rule is satisfied and exits when the exit rule is.
///
/// No operation is signalled for indices below the unstable period, the
/// usual way of skipping the warm-up of the indicators behind the rules.
#[derive(Debug)]
pub struct RuleStrategy {
    name: String,
    description: String,
    entry: BoxedRule,
    exit: BoxedRule,
    unstable_period: usize,
}

impl RuleStrategy {
    pub fn new(
        name: impl Into<String>,
        entry: impl Rule + 'static,
        exit: impl Rule + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            entry: Box::new(entry),
            exit: Box::new(exit),
            unstable_period: 0,
        }
    }

    pub fn with_unstable_period(mut self, unstable_period: usize) -> Self {
        self.unstable_period = unstable_period;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn entry_rule(&self) -> &dyn Rule {
        self.entry.as_ref()
    }

    pub fn exit_rule(&self) -> &dyn Rule {
        self.exit.as_ref()
    }
}

impl Strategy for RuleStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_enter(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        if self.is_unstable_at(index) {
            return Ok(false);
        }
        self.entry.is_satisfied(index, record)
    }

    fn should_exit(
        &self,
        index: usize,
        record: Option<&TradingRecord>,
    ) -> Result<bool, IndicatorError> {
        if self.is_unstable_at(index) {
            return Ok(false);
        }
        self.exit.is_satisfied(index, record)
    }

    fn unstable_period(&self) -> usize {
        self.unstable_period
    }

    fn description(&self) -> &str {
        &self.description
    }
}
