//! Pair-key encodings used by rate providers.
//!
//! A provider indexes its quotes either by the bare target currency (base is implicitly
//! [`IMPLICIT_BASE`]) or by a six letter base+target concatenation. Which one applies is
//! looked up per provider in [`ProviderEncodings`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::currency::CurrencyCode;

pub const IMPLICIT_BASE: &str = "USD";

/// Provider known to quote with concatenated pair-keys, e.g. "USDGHS"
pub const CURRENCY_LAYER: &str = "CurrencyLayer";

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKeyEncoding {
    /// Key is the target code, base is [`IMPLICIT_BASE`]
    BareTarget,
    /// Key is base(3) + target(3)
    ConcatenatedPair,
}

impl PairKeyEncoding {
    const CODE_LEN: usize = 3;
    const PAIR_KEY_LEN: usize = 2 * Self::CODE_LEN;

    /// Keys that don't fit the encoding fall back to the bare-target reading,
    /// so a malformed key yields a (possibly meaningless) target instead of an error.
    pub fn decode(self, pair_key: &str) -> CurrencyPair {
        match self {
            PairKeyEncoding::ConcatenatedPair
                if pair_key.chars().count() == Self::PAIR_KEY_LEN =>
            {
                let split_at = pair_key
                    .char_indices()
                    .nth(Self::CODE_LEN)
                    .map_or(pair_key.len(), |(idx, _)| idx);
                let (base, target) = pair_key.split_at(split_at);
                CurrencyPair::new(base.into(), target.into())
            }
            _ => CurrencyPair::new(IMPLICIT_BASE.into(), pair_key.into()),
        }
    }

    /// Pair-key under which a provider with this encoding quotes `currency` against [`IMPLICIT_BASE`]
    pub fn encode(self, currency: &CurrencyCode) -> String {
        match self {
            PairKeyEncoding::BareTarget => currency.as_str().to_owned(),
            PairKeyEncoding::ConcatenatedPair => format!("{IMPLICIT_BASE}{currency}"),
        }
    }
}

impl Default for PairKeyEncoding {
    fn default() -> Self {
        PairKeyEncoding::BareTarget
    }
}

/// Capability lookup from provider name to its pair-key encoding
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEncodings {
    by_source: HashMap<String, PairKeyEncoding>,
    fallback: PairKeyEncoding,
}

impl ProviderEncodings {
    /// Every provider uses `fallback` until registered otherwise
    pub fn new(fallback: PairKeyEncoding) -> Self {
        Self {
            by_source: HashMap::new(),
            fallback,
        }
    }

    pub fn with_concatenated_pair_providers<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut encodings = Self::new(PairKeyEncoding::BareTarget);
        for provider in providers {
            encodings.register(provider, PairKeyEncoding::ConcatenatedPair);
        }
        encodings
    }

    pub fn register(&mut self, source: impl Into<String>, encoding: PairKeyEncoding) {
        let _ = self.by_source.insert(source.into(), encoding);
    }

    pub fn encoding_for(&self, source: &str) -> PairKeyEncoding {
        self.by_source
            .get(source)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn decode(&self, source: &str, pair_key: &str) -> CurrencyPair {
        self.encoding_for(source).decode(pair_key)
    }

    pub fn encode(&self, source: &str, currency: &CurrencyCode) -> String {
        self.encoding_for(source).encode(currency)
    }
}

impl Default for ProviderEncodings {
    fn default() -> Self {
        Self::with_concatenated_pair_providers([CURRENCY_LAYER])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pair(base: &str, target: &str) -> CurrencyPair {
        CurrencyPair::new(base.into(), target.into())
    }

    #[rstest]
    #[case(CURRENCY_LAYER, "USDGHS", pair("USD", "GHS"))]
    #[case(CURRENCY_LAYER, "EURNGN", pair("EUR", "NGN"))]
    #[case("OpenExchange", "NGN", pair("USD", "NGN"))]
    // six letter keys are only split for concatenated-pair providers
    #[case("OpenExchange", "USDGHS", pair("USD", "USDGHS"))]
    // wrong length falls back to the bare reading
    #[case(CURRENCY_LAYER, "GHS", pair("USD", "GHS"))]
    #[case(CURRENCY_LAYER, "USDGHSX", pair("USD", "USDGHSX"))]
    #[case(CURRENCY_LAYER, "", pair("USD", ""))]
    fn decode_pair_key(#[case] source: &str, #[case] key: &str, #[case] expected: CurrencyPair) {
        let encodings = ProviderEncodings::default();

        assert_eq!(encodings.decode(source, key), expected);
    }

    #[test]
    fn decode_splits_on_char_boundaries() {
        let decoded = PairKeyEncoding::ConcatenatedPair.decode("ÜSDGHS");

        assert_eq!(decoded, pair("ÜSD", "GHS"));
    }

    #[rstest]
    #[case(CURRENCY_LAYER, "GHS", "USDGHS")]
    #[case("OpenExchange", "GHS", "GHS")]
    fn encode_currency(#[case] source: &str, #[case] currency: &str, #[case] expected: &str) {
        let encodings = ProviderEncodings::default();

        assert_eq!(encodings.encode(source, &currency.into()), expected);
    }

    #[test]
    fn registered_provider_overrides_fallback() {
        let mut encodings = ProviderEncodings::new(PairKeyEncoding::BareTarget);
        assert_eq!(encodings.encoding_for(CURRENCY_LAYER), PairKeyEncoding::BareTarget);

        encodings.register("Fixer", PairKeyEncoding::ConcatenatedPair);

        assert_eq!(encodings.encoding_for("Fixer"), PairKeyEncoding::ConcatenatedPair);
        assert_eq!(encodings.encoding_for("Other"), PairKeyEncoding::BareTarget);
    }
}
