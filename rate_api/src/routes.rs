use actix_web::web;
use actix_web::web::ServiceConfig;
use fx_domain::api::{CONSOLIDATED_RATE_PATH, FOREX_RATES_PATH, UPDATE_RATE_PATH};

use crate::handlers::{consolidated_rate, forex_rates};

pub(crate) fn routes(app: &mut ServiceConfig) {
    app.service(web::resource(FOREX_RATES_PATH).route(web::get().to(forex_rates::list)))
        .service(web::resource(UPDATE_RATE_PATH).route(web::post().to(forex_rates::update)))
        .service(
            web::resource(CONSOLIDATED_RATE_PATH).route(web::get().to(consolidated_rate::get)),
        );
}
