use std::time::Duration;

use fx_domain::encoding::{ProviderEncodings, CURRENCY_LAYER};
use serde::Deserialize;

use crate::amount::AmountPolicy;
use crate::state::DashboardState;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub default_from: String,
    pub default_to: String,
    pub default_amount: String,
    pub amount_policy: AmountPolicy,
    pub request_timeout_secs: u64,
    /// Providers whose pair-keys are six letter base+target concatenations
    pub concatenated_pair_providers: Vec<String>,
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn encodings(&self) -> ProviderEncodings {
        ProviderEncodings::with_concatenated_pair_providers(
            self.concatenated_pair_providers.iter().cloned(),
        )
    }

    pub fn initial_state(&self) -> DashboardState {
        DashboardState::new(
            self.default_from.as_str().into(),
            self.default_to.as_str().into(),
            self.default_amount.clone(),
            self.amount_policy,
        )
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".into(),
            default_from: "USD".into(),
            default_to: "AED".into(),
            default_amount: "1".into(),
            amount_policy: AmountPolicy::Filtered,
            request_timeout_secs: 30,
            concatenated_pair_providers: vec![CURRENCY_LAYER.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_domain::encoding::PairKeyEncoding;
    use fx_utils::config::parse_config;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_built_in_dashboard() {
        let config: DashboardConfig = parse_config("").expect("in test");

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_state(), DashboardState::default());
        assert_eq!(
            config.encodings().encoding_for(CURRENCY_LAYER),
            PairKeyEncoding::ConcatenatedPair
        );
    }

    #[test]
    fn parse_dashboard_config() {
        let content = r#"
            api_base_url = "https://rates.example.com"
            default_from = "EUR"
            default_to = "GHS"
            default_amount = "100"
            amount_policy = "unfiltered"
            request_timeout_secs = 5
            concatenated_pair_providers = ["Fixer"]
        "#;

        let config: DashboardConfig = parse_config(content).expect("in test");
        let state = config.initial_state();

        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(state.from_currency.as_str(), "EUR");
        assert_eq!(state.to_currency.as_str(), "GHS");
        assert_eq!(state.amount, "100");
        assert_eq!(state.amount_policy, AmountPolicy::Unfiltered);
        assert_eq!(
            config.encodings().encoding_for("Fixer"),
            PairKeyEncoding::ConcatenatedPair
        );
        assert_eq!(
            config.encodings().encoding_for(CURRENCY_LAYER),
            PairKeyEncoding::BareTarget
        );
    }
}
