//! Wire types of the rates HTTP API shared by the mock server and the dashboard client.

use serde::{Deserialize, Serialize};

use crate::rates::RateQuote;
use crate::Rate;

pub const FOREX_RATES_PATH: &str = "/api/forex-rates";
pub const UPDATE_RATE_PATH: &str = "/api/update-rate";
pub const CONSOLIDATED_RATE_PATH: &str = "/api/consolidated-rate";

pub const MISSING_PARAMS_MESSAGE: &str = "Missing 'from' or 'to' parameter.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRate {
    pub from: String,
    pub to: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Rate,
}

/// `currency` is the provider pair-key, already encoded by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRateRequest {
    pub source: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRateResponse {
    pub source: String,
    pub currency: String,
    #[serde(flatten)]
    pub quote: RateQuote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn consolidated_rate_is_a_json_number() {
        let rate: ConsolidatedRate =
            serde_json::from_str(r#"{"from":"USD","to":"AED","rate":1.234567}"#).expect("in test");

        assert_eq!(rate.rate, dec!(1.234567));
        assert_eq!(
            serde_json::to_value(&rate).expect("in test")["rate"],
            serde_json::json!(1.234567)
        );
    }

    #[test]
    fn update_response_flattens_quote() {
        let response = UpdateRateResponse {
            source: "CurrencyLayer".into(),
            currency: "USDGHS".into(),
            quote: RateQuote::new(dec!(0.99), dec!(1.01)),
        };

        assert_eq!(
            serde_json::to_value(&response).expect("in test"),
            serde_json::json!({
                "source": "CurrencyLayer",
                "currency": "USDGHS",
                "buyRate": 0.99,
                "sellRate": 1.01
            })
        );
    }
}
