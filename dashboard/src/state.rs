//! Dashboard UI state and the reducer that moves it between snapshots.

use std::collections::HashMap;

use fx_domain::currency::CurrencyCode;
use fx_domain::rates::RateSource;

use crate::amount::AmountPolicy;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    /// Replaces the whole table, no merging with previous rates
    RatesLoaded(Vec<RateSource>),
    FetchFinished,
    UpdateStarted(CurrencyCode),
    UpdateFinished(CurrencyCode),
    SelectFrom(CurrencyCode),
    SelectTo(CurrencyCode),
    Swap,
    AmountInput(String),
    Converted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub rates: Vec<RateSource>,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub amount: String,
    pub converted_amount: Option<String>,
    pub loading: bool,
    pub update_loading: HashMap<CurrencyCode, bool>,
    pub amount_policy: AmountPolicy,
}

impl DashboardState {
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        amount: impl Into<String>,
        amount_policy: AmountPolicy,
    ) -> Self {
        Self {
            rates: Vec::new(),
            from_currency,
            to_currency,
            amount: amount.into(),
            converted_amount: None,
            loading: false,
            update_loading: HashMap::new(),
            amount_policy,
        }
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::FetchStarted => self.loading = true,
            Action::RatesLoaded(rates) => self.rates = rates,
            Action::FetchFinished => self.loading = false,
            Action::UpdateStarted(currency) => {
                let _ = self.update_loading.insert(currency, true);
            }
            Action::UpdateFinished(currency) => {
                let _ = self.update_loading.insert(currency, false);
            }
            Action::SelectFrom(currency) => self.from_currency = currency,
            Action::SelectTo(currency) => self.to_currency = currency,
            Action::Swap => std::mem::swap(&mut self.from_currency, &mut self.to_currency),
            Action::AmountInput(value) => {
                if self.amount_policy.accepts(&value) {
                    self.amount = value;
                } else {
                    log::trace!("Amount input '{value}' discarded");
                }
            }
            Action::Converted(converted_amount) => self.converted_amount = Some(converted_amount),
        }

        self
    }

    pub fn is_updating(&self, currency: &CurrencyCode) -> bool {
        self.update_loading
            .get(currency)
            .copied()
            .unwrap_or(false)
    }

    /// Conversion needs all three fields filled in
    pub fn can_convert(&self) -> bool {
        !self.amount.is_empty() && !self.from_currency.is_empty() && !self.to_currency.is_empty()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new("USD".into(), "AED".into(), "1", AmountPolicy::default())
    }
}
