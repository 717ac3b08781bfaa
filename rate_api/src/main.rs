#![deny(
    non_ascii_idents,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_must_use,
    clippy::unwrap_used
)]

mod config;
mod error;
mod handlers;
mod routes;
mod server;
mod services;

use std::path::PathBuf;

use clap::Parser;
use fx_utils::config::load_config_or_default;
use fx_utils::logger::init_logger_file_named;

use crate::config::AppConfig;
use crate::server::start;

/// Mock exchange-rate service: forex rates book, per-rate updates and a random consolidated rate
#[derive(Parser, Debug)]
#[command(name = "rate_api", version)]
struct Args {
    /// TOML config, built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger_file_named("rate_api_log.txt");

    let config: AppConfig = load_config_or_default(args.config.as_ref())?;

    let result = start(config).await;
    if let Err(error) = &result {
        log::error!("Rate API stopped with error: {error:?}");
    }
    result
}
