use std::sync::Arc;

use fx_domain::rates::{RateQuote, RateSource};
use fx_domain::Rate;
use parking_lot::RwLock;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::services::rate_generator::{UniformRateGenerator, RATE_DECIMAL_PLACES};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RatesBookError {
    #[error("Unknown rate source '{0}'")]
    UnknownSource(String),

    #[error("Rate source '{source_name}' has no rate for '{pair_key}'")]
    UnknownPairKey {
        source_name: String,
        pair_key: String,
    },

    #[error("Spread must be in [0, 1), got {0}")]
    InvalidSpread(Rate),
}

/// In-memory quotes of all mock providers. Nothing is persisted, a restart reseeds from config.
pub struct RatesBook {
    sources: RwLock<Vec<RateSource>>,
    spread: Rate,
    generator: Arc<UniformRateGenerator>,
}

impl RatesBook {
    pub fn new(
        sources: Vec<RateSource>,
        spread: Rate,
        generator: Arc<UniformRateGenerator>,
    ) -> Result<Self, RatesBookError> {
        if spread < dec!(0) || spread >= dec!(1) {
            return Err(RatesBookError::InvalidSpread(spread));
        }

        Ok(Self {
            sources: RwLock::new(sources),
            spread,
            generator,
        })
    }

    pub fn snapshot(&self) -> Vec<RateSource> {
        self.sources.read().clone()
    }

    /// Draws a new mid rate for `pair_key` of `source_name` and quotes it with the book spread
    pub fn requote(&self, source_name: &str, pair_key: &str) -> Result<RateQuote, RatesBookError> {
        let quote = self.quote_around(self.generator.next_rate());

        let mut sources = self.sources.write();
        let source = sources
            .iter_mut()
            .find(|source| source.source == source_name)
            .ok_or_else(|| RatesBookError::UnknownSource(source_name.to_owned()))?;

        let existing =
            source
                .rates
                .get_mut(pair_key)
                .ok_or_else(|| RatesBookError::UnknownPairKey {
                    source_name: source_name.to_owned(),
                    pair_key: pair_key.to_owned(),
                })?;
        *existing = quote;

        Ok(quote)
    }

    fn quote_around(&self, mid: Rate) -> RateQuote {
        let round = |value: Rate| {
            value.round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        };

        RateQuote::new(
            round(mid * (dec!(1) - self.spread)),
            round(mid * (dec!(1) + self.spread)),
        )
    }
}
