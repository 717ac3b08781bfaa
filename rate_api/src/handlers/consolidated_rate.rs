use actix_web::web::{Data, Json, Query};
use fx_domain::api::{ConsolidatedRate, MISSING_PARAMS_MESSAGE};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::rate_generator::UniformRateGenerator;

#[derive(Deserialize, Debug)]
pub struct ConsolidatedRateQuery {
    from: Option<String>,
    to: Option<String>,
}

/// Both currencies are echoed back verbatim, they are never checked against known codes
pub async fn get(
    query: Query<ConsolidatedRateQuery>,
    generator: Data<UniformRateGenerator>,
) -> Result<Json<ConsolidatedRate>, AppError> {
    let ConsolidatedRateQuery { from, to } = query.into_inner();
    let (from, to) = match (non_empty(from), non_empty(to)) {
        (Some(from), Some(to)) => (from, to),
        _ => return Err(AppError::BadRequest(MISSING_PARAMS_MESSAGE.to_owned())),
    };

    let rate = generator.next_rate();
    log::trace!("Consolidated rate {from} -> {to}: {rate}");

    Ok(Json(ConsolidatedRate { from, to, rate }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.is_empty())
}
