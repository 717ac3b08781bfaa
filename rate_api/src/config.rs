use fx_domain::encoding::CURRENCY_LAYER;
use fx_domain::rates::{RateQuote, RateSource};
use fx_domain::Rate;
use rust_decimal_macros::dec;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub address: String,
    /// Actix workers, defaults to the number of physical cores
    pub workers: Option<usize>,
    /// Relative half-spread applied around a re-quoted mid rate
    #[serde(with = "rust_decimal::serde::float")]
    pub spread: Rate,
    pub sources: Vec<RateSource>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".into(),
            workers: None,
            spread: dec!(0.01),
            sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<RateSource> {
    let open_exchange = [
        ("AED", RateQuote::new(dec!(3.6712), dec!(3.6735))),
        ("GHS", RateQuote::new(dec!(15.1020), dec!(15.3050))),
        ("NGN", RateQuote::new(dec!(1580.5000), dec!(1600.2500))),
        ("EUR", RateQuote::new(dec!(0.9180), dec!(0.9230))),
    ];
    let currency_layer = [
        ("USDAED", RateQuote::new(dec!(3.6705), dec!(3.6740))),
        ("USDGHS", RateQuote::new(dec!(15.0500), dec!(15.3500))),
        ("USDNGN", RateQuote::new(dec!(1575.0000), dec!(1605.0000))),
        ("USDGBP", RateQuote::new(dec!(0.7850), dec!(0.7910))),
    ];

    vec![
        RateSource::new("OpenExchange", open_exchange.into_iter().collect()),
        RateSource::new(CURRENCY_LAYER, currency_layer.into_iter().collect()),
    ]
}
