use itertools::Itertools;

use crate::currency::CurrencyCode;
use crate::encoding::ProviderEncodings;
use crate::rates::RateSource;

/// Target currencies quoted by any of the sources, deduplicated in first-seen order
/// (sources in order, then keys in the order each source listed them).
pub fn available_currencies(
    sources: &[RateSource],
    encodings: &ProviderEncodings,
) -> Vec<CurrencyCode> {
    sources
        .iter()
        .flat_map(|source| {
            let encoding = encodings.encoding_for(&source.source);
            source
                .rates
                .keys()
                .map(move |pair_key| encoding.decode(pair_key).target)
        })
        .unique()
        .collect_vec()
}
