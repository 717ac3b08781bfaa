use fx_domain::api::UpdateRateRequest;
use fx_domain::currencies::available_currencies;
use fx_domain::currency::CurrencyCode;
use fx_domain::encoding::ProviderEncodings;
use fx_domain::Amount;
use parking_lot::Mutex;
use rust_decimal::RoundingStrategy;
use scopeguard::defer;
use thiserror::Error;

use crate::amount::{parse_amount, AmountError};
use crate::api_client::{ApiError, RatesApi};
use crate::state::{Action, DashboardState};

const CONVERTED_DECIMAL_PLACES: u32 = 2;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("Converted amount overflows for {amount} at rate {rate}")]
    Overflow { amount: Amount, rate: Amount },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("There is no rate source to update")]
    NoSources,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Owns the dashboard state and runs the network side of every user action.
///
/// Failures are logged and leave the state as it was, so the table keeps showing the
/// last good rates. The state lock is never held across an `.await`.
pub struct Dashboard<Api: RatesApi> {
    api: Api,
    encodings: ProviderEncodings,
    state: Mutex<DashboardState>,
}

impl<Api: RatesApi> Dashboard<Api> {
    pub fn new(api: Api, encodings: ProviderEncodings, state: DashboardState) -> Self {
        Self {
            api,
            encodings,
            state: Mutex::new(state),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.lock().clone()
    }

    pub fn encodings(&self) -> &ProviderEncodings {
        &self.encodings
    }

    pub fn currencies(&self) -> Vec<CurrencyCode> {
        available_currencies(&self.state.lock().rates, &self.encodings)
    }

    fn apply(&self, action: Action) {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut *state);
        *state = current.reduce(action);
    }

    pub async fn fetch_rates(&self) -> Result<(), ApiError> {
        self.apply(Action::FetchStarted);
        defer! { self.apply(Action::FetchFinished) }

        match self.api.forex_rates().await {
            Ok(rates) => {
                log::info!("Fetched rates of {} sources", rates.len());
                self.apply(Action::RatesLoaded(rates));
                Ok(())
            }
            Err(error) => {
                log::error!("Error fetching rates: {error}");
                Err(error)
            }
        }
    }

    /// Asks the rates book to requote `currency` of `source`, then reloads every source.
    /// The reload happens whatever the book did with the request, as long as it answered 2xx.
    pub async fn update_rate(&self, source: &str, currency: &CurrencyCode) -> Result<(), ApiError> {
        self.apply(Action::UpdateStarted(currency.clone()));
        defer! { self.apply(Action::UpdateFinished(currency.clone())) }

        let request = UpdateRateRequest {
            source: source.to_owned(),
            currency: self.encodings.encode(source, currency),
        };

        if let Err(error) = self.api.update_rate(request).await {
            log::error!("Error updating rate {currency} of {source}: {error}");
            return Err(error);
        }

        self.fetch_rates().await
    }

    /// Row refresh of the table: updates the currency at the first listed source
    pub async fn update_row(&self, currency: &CurrencyCode) -> Result<(), UpdateError> {
        let source = self
            .state
            .lock()
            .rates
            .first()
            .map(|source| source.source.clone());

        match source {
            Some(source) => Ok(self.update_rate(&source, currency).await?),
            None => {
                log::warn!("Unable to update {currency}: rates are not loaded");
                Err(UpdateError::NoSources)
            }
        }
    }

    /// Returns the formatted result, or `None` when a field is empty and nothing was requested
    pub async fn convert(&self) -> Result<Option<String>, ConvertError> {
        let (amount, from, to) = {
            let state = self.state.lock();
            if !state.can_convert() {
                return Ok(None);
            }
            (
                state.amount.clone(),
                state.from_currency.clone(),
                state.to_currency.clone(),
            )
        };

        let result = self.convert_amount(&amount, from, to).await;
        match &result {
            Ok(converted) => self.apply(Action::Converted(converted.clone())),
            Err(error) => log::error!("Error converting currency: {error}"),
        }

        result.map(Some)
    }

    async fn convert_amount(
        &self,
        amount: &str,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<String, ConvertError> {
        let parsed = parse_amount(amount)?;

        let consolidated = self.api.consolidated_rate(from, to).await?;
        let rate = consolidated.rate;

        let converted = parsed
            .checked_mul(rate)
            .ok_or(ConvertError::Overflow {
                amount: parsed,
                rate,
            })?
            .round_dp_with_strategy(
                CONVERTED_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            );

        Ok(format!("{converted:.2}"))
    }

    pub fn swap(&self) {
        self.apply(Action::Swap);
    }

    pub fn select_from(&self, currency: CurrencyCode) {
        self.apply(Action::SelectFrom(currency));
    }

    pub fn select_to(&self, currency: CurrencyCode) {
        self.apply(Action::SelectTo(currency));
    }

    /// Returns `false` when the amount policy discarded the input
    pub fn input_amount(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.apply(Action::AmountInput(value.clone()));
        self.state.lock().amount == value
    }
}
