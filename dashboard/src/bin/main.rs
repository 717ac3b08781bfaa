use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fx_dashboard::api_client::HttpRatesApi;
use fx_dashboard::config::DashboardConfig;
use fx_dashboard::controller::Dashboard;
use fx_dashboard::terminal;
use fx_utils::config::load_config_or_default;
use fx_utils::logger::init_logger_with_console_level;
use log::LevelFilter;
use tokio::io::BufReader;

/// Terminal currency dashboard: rates comparison table and converter
#[derive(Parser, Debug)]
#[command(name = "fx_dashboard", version)]
struct Args {
    /// TOML config, built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // everything goes to the file, the console belongs to the table
    init_logger_with_console_level("dashboard_log.txt", LevelFilter::Off);

    let config: DashboardConfig = load_config_or_default(args.config.as_ref())?;
    log::info!("Starting dashboard against {}", config.api_base_url);

    let api = HttpRatesApi::new(&config.api_base_url, config.request_timeout());
    let dashboard = Arc::new(Dashboard::new(
        api,
        config.encodings(),
        config.initial_state(),
    ));

    println!("{}\n", terminal::HELP);
    terminal::run(dashboard, BufReader::new(tokio::io::stdin())).await
}
