use actix_web::web::{Data, Json};
use fx_domain::api::{UpdateRateRequest, UpdateRateResponse};
use fx_domain::rates::RateSource;

use crate::error::AppError;
use crate::services::rates_book::RatesBook;

pub async fn list(rates_book: Data<RatesBook>) -> Json<Vec<RateSource>> {
    Json(rates_book.snapshot())
}

/// `currency` in the payload is the provider's own pair-key, e.g. "USDGHS" for CurrencyLayer
pub async fn update(
    payload: Json<UpdateRateRequest>,
    rates_book: Data<RatesBook>,
) -> Result<Json<UpdateRateResponse>, AppError> {
    let UpdateRateRequest { source, currency } = payload.into_inner();

    match rates_book.requote(&source, &currency) {
        Ok(quote) => {
            log::info!(
                "Rate {currency} of {source} updated: buy {}, sell {}",
                quote.buy_rate,
                quote.sell_rate
            );
            Ok(Json(UpdateRateResponse {
                source,
                currency,
                quote,
            }))
        }
        Err(error) => {
            log::warn!("Update rate error: {error}");
            Err(error.into())
        }
    }
}
