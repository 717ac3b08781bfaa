use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use fx_domain::api::ErrorResponse;
use thiserror::Error;

use crate::services::rates_book::RatesBookError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

impl From<RatesBookError> for AppError {
    fn from(error: RatesBookError) -> Self {
        match error {
            RatesBookError::UnknownSource(_) | RatesBookError::UnknownPairKey { .. } => {
                AppError::NotFound(error.to_string())
            }
            RatesBookError::InvalidSpread(_) => {
                log::error!("Rates book misconfigured: {error}");
                AppError::InternalServerError
            }
        }
    }
}
