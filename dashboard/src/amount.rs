use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use fx_domain::Amount;

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // ASCII digits only, `\d` would also let through other Unicode digits
    Regex::new(r"^[0-9]*\.?[0-9]*$").expect("Amount pattern should be a valid regex")
});

/// Which keystrokes the amount field takes
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// Empty or digits with at most one decimal point, anything else is discarded
    Filtered,
    /// Every input is taken as typed
    Unfiltered,
}

impl AmountPolicy {
    pub fn accepts(self, value: &str) -> bool {
        match self {
            AmountPolicy::Filtered => value.is_empty() || AMOUNT_PATTERN.is_match(value),
            AmountPolicy::Unfiltered => true,
        }
    }
}

impl Default for AmountPolicy {
    fn default() -> Self {
        AmountPolicy::Filtered
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount '{0}' is not a number")]
    NotANumber(String),

    #[error("Amount '{0}' is too large")]
    OutOfRange(String),
}

/// Reads the amount field the way a user means it: "1." is 1 and ".5" is 0.5.
/// Well-formed digits beyond the `Decimal` range are `OutOfRange`, not `NotANumber`.
pub fn parse_amount(value: &str) -> Result<Amount, AmountError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let normalized = if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_owned()
    };

    Amount::from_str(&normalized).map_err(|_| {
        let has_digits = normalized.bytes().any(|byte| byte.is_ascii_digit());
        if has_digits && AMOUNT_PATTERN.is_match(&normalized) {
            AmountError::OutOfRange(value.to_owned())
        } else {
            AmountError::NotANumber(value.to_owned())
        }
    })
}
