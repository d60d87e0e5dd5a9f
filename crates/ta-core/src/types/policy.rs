//! Policies for the two situations where a computation has no single obvious answer.

use serde::{Deserialize, Serialize};

/// How a windowed indicator behaves before `n` values are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Use every value available so far (window of `index - begin + 1`)
    #[default]
    Shrink,
    /// Fail with `IndicatorError::InsufficientData`
    Strict,
}

/// How a trade that is still open at the end of the series is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenTradePolicy {
    /// The open trade contributes nothing
    #[default]
    Exclude,
    /// Score the open trade as if it were exited at the last close
    CloseAtLastPrice,
}

impl std::fmt::Display for OpenTradePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenTradePolicy::Exclude => write!(f, "exclude"),
            OpenTradePolicy::CloseAtLastPrice => write!(f, "close_at_last_price"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        assert_eq!(WindowPolicy::default(), WindowPolicy::Shrink);
        assert_eq!(OpenTradePolicy::default(), OpenTradePolicy::Exclude);
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: OpenTradePolicy = serde_json::from_str("\"close_at_last_price\"").unwrap();
        assert_eq!(policy, OpenTradePolicy::CloseAtLastPrice);
        assert_eq!(serde_json::to_string(&WindowPolicy::Strict).unwrap(), "\"strict\"");
    }
}
