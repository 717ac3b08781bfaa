use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Formatter};

use crate::currency::CurrencyCode;
use crate::encoding::ProviderEncodings;
use crate::Rate;

/// Two-sided quote of a provider for one pair-key.
/// `buy_rate <= sell_rate` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_rate: Rate,
    #[serde(with = "rust_decimal::serde::float")]
    pub sell_rate: Rate,
}

impl RateQuote {
    pub fn new(buy_rate: Rate, sell_rate: Rate) -> Self {
        Self {
            buy_rate,
            sell_rate,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.buy_rate <= self.sell_rate
    }
}

/// Quotes by pair-key in the order the provider listed them.
/// A repeated key overwrites the earlier value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteMap(Vec<(String, RateQuote)>);

impl QuoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pair_key: &str) -> Option<&RateQuote> {
        self.0
            .iter()
            .find(|(key, _)| key == pair_key)
            .map(|(_, quote)| quote)
    }

    pub fn get_mut(&mut self, pair_key: &str) -> Option<&mut RateQuote> {
        self.0
            .iter_mut()
            .find(|(key, _)| key == pair_key)
            .map(|(_, quote)| quote)
    }

    /// Returns the replaced quote if the key was already present
    pub fn insert(&mut self, pair_key: impl Into<String>, quote: RateQuote) -> Option<RateQuote> {
        let pair_key = pair_key.into();
        match self.get_mut(&pair_key) {
            Some(existing) => Some(std::mem::replace(existing, quote)),
            None => {
                self.0.push((pair_key, quote));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RateQuote)> {
        self.0.iter().map(|(key, quote)| (key.as_str(), quote))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RateQuote)> for QuoteMap {
    fn from_iter<T: IntoIterator<Item = (K, RateQuote)>>(iter: T) -> Self {
        let mut map = QuoteMap::new();
        for (key, quote) in iter {
            let _ = map.insert(key, quote);
        }
        map
    }
}

impl Serialize for QuoteMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, quote) in self.iter() {
            map.serialize_entry(key, quote)?;
        }
        map.end()
    }
}

struct QuoteMapVisitor;

impl<'de> Visitor<'de> for QuoteMapVisitor {
    type Value = QuoteMap;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "map of pair-key to {{buyRate, sellRate}}")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = QuoteMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((key, quote)) = access.next_entry::<String, RateQuote>()? {
            let _ = map.insert(key, quote);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for QuoteMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(QuoteMapVisitor)
    }
}

/// Rates quoted by one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSource {
    pub source: String,
    pub rates: QuoteMap,
}

impl RateSource {
    pub fn new(source: impl Into<String>, rates: QuoteMap) -> Self {
        Self {
            source: source.into(),
            rates,
        }
    }

    /// Quote for `currency` against the implicit base, keyed the way this provider encodes pairs
    pub fn quote_for(
        &self,
        encodings: &ProviderEncodings,
        currency: &CurrencyCode,
    ) -> Option<&RateQuote> {
        let pair_key = encodings.encode(&self.source, currency);
        self.rates.get(&pair_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::CURRENCY_LAYER;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn quote(buy: Rate, sell: Rate) -> RateQuote {
        RateQuote::new(buy, sell)
    }

    #[test]
    fn parse_sources_keeping_key_order() {
        let json = r#"[
            {"source": "OpenExchange", "rates": {
                "NGN": {"buyRate": 1580.5, "sellRate": 1600.25},
                "GHS": {"buyRate": 15.1, "sellRate": 15.3}
            }},
            {"source": "CurrencyLayer", "rates": {
                "USDGHS": {"buyRate": 15.05, "sellRate": 15.35}
            }}
        ]"#;

        let sources: Vec<RateSource> = serde_json::from_str(json).expect("in test");

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].source, "OpenExchange");
        assert_eq!(sources[0].rates.keys().collect::<Vec<_>>(), vec!["NGN", "GHS"]);
        assert_eq!(
            sources[0].rates.get("NGN"),
            Some(&quote(dec!(1580.5), dec!(1600.25)))
        );
        assert_eq!(
            sources[1].rates.get("USDGHS"),
            Some(&quote(dec!(15.05), dec!(15.35)))
        );
    }

    #[test]
    fn repeated_key_overwrites_in_place() {
        let json = r#"{
            "A": {"buyRate": 1, "sellRate": 2},
            "B": {"buyRate": 3, "sellRate": 4},
            "A": {"buyRate": 5, "sellRate": 6}
        }"#;

        let map: QuoteMap = serde_json::from_str(json).expect("in test");

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(&quote(dec!(5), dec!(6))));
    }

    #[test]
    fn serialize_quotes_as_numbers() {
        let source = RateSource::new(
            "OpenExchange",
            [("GHS", quote(dec!(15.1), dec!(15.3)))].into_iter().collect(),
        );

        let json = serde_json::to_value(&source).expect("in test");

        assert_eq!(
            json,
            serde_json::json!({
                "source": "OpenExchange",
                "rates": {"GHS": {"buyRate": 15.1, "sellRate": 15.3}}
            })
        );
    }

    #[test]
    fn quote_lookup_follows_provider_encoding() {
        let encodings = ProviderEncodings::default();
        let currency_layer = RateSource::new(
            CURRENCY_LAYER,
            [
                ("USDGHS", quote(dec!(15.05), dec!(15.35))),
                ("GHS", quote(dec!(1), dec!(1))),
            ]
            .into_iter()
            .collect(),
        );
        let generic = RateSource::new(
            "OpenExchange",
            [
                ("GHS", quote(dec!(15.1), dec!(15.3))),
                ("USDGHS", quote(dec!(2), dec!(2))),
            ]
            .into_iter()
            .collect(),
        );
        let ghs = "GHS".into();

        assert_eq!(
            currency_layer.quote_for(&encodings, &ghs),
            Some(&quote(dec!(15.05), dec!(15.35)))
        );
        assert_eq!(
            generic.quote_for(&encodings, &ghs),
            Some(&quote(dec!(15.1), dec!(15.3)))
        );
        assert_eq!(generic.quote_for(&encodings, &"AED".into()), None);
    }

    #[test]
    fn insert_reports_replaced_quote() {
        let mut map = QuoteMap::new();

        assert_eq!(map.insert("GHS", quote(dec!(1), dec!(2))), None);
        assert_eq!(
            map.insert("GHS", quote(dec!(3), dec!(4))),
            Some(quote(dec!(1), dec!(2)))
        );
        assert_eq!(map.len(), 1);
        assert!(map.get("GHS").map_or(false, RateQuote::is_ordered));
    }
}
