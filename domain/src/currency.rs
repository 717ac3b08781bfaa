use serde::{Deserialize, Serialize};
use smallstr::SmallString;
use std::fmt::{self, Display, Formatter};

type String8 = SmallString<[u8; 8]>;

/// Currency code as the rate providers spell it, e.g. USD, GHS.
/// No ISO validation happens here: whatever a provider put in its pair-key ends up in the code.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String8);

impl CurrencyCode {
    #[inline]
    pub fn new(currency_code: String8) -> Self {
        CurrencyCode(currency_code)
    }

    /// Extracts a string slice containing the entire string.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Regional indicator "flag" for the code: every letter is shifted into the
    /// U+1F1E6..U+1F1FF block. Only the first two letters of an ISO 4217 code are a
    /// country code, so most codes render as a flag followed by a lone indicator.
    pub fn flag(&self) -> String {
        const REGIONAL_INDICATOR_OFFSET: u32 = 127397;

        self.as_str()
            .to_uppercase()
            .chars()
            .filter_map(|ch| char::from_u32(REGIONAL_INDICATOR_OFFSET + ch as u32))
            .collect()
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        CurrencyCode(String8::from_str(value))
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        CurrencyCode(String8::from_string(value))
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
