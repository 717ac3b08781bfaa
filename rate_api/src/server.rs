use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::{Data, JsonConfig, QueryConfig};
use actix_web::{App, HttpServer};
use fx_utils::logger::print_info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::routes;
use crate::services::rate_generator::UniformRateGenerator;
use crate::services::rates_book::RatesBook;

pub async fn start(config: AppConfig) -> anyhow::Result<()> {
    print_info(format!("Starting rate API at {}", config.address));

    let generator = Arc::new(UniformRateGenerator::from_entropy());
    let rates_book = Data::new(RatesBook::new(
        config.sources,
        config.spread,
        generator.clone(),
    )?);
    let generator = Data::from(generator);

    let mut server = HttpServer::new(move || {
        App::new()
            .configure(routes)
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(generator.clone())
            .app_data(rates_book.clone())
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(&config.address)?.run().await?;

    log::info!("Server at {} has been stopped", config.address);
    Ok(())
}

/// Malformed bodies are answered with the same `{error}` JSON as every other failure
pub(crate) fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|error, _| AppError::BadRequest(error.to_string()).into())
}

pub(crate) fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|error, _| AppError::BadRequest(error.to_string()).into())
}
