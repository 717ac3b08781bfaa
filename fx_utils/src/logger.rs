use chrono::Utc;
use log::LevelFilter;
use std::env;
use std::sync::Once;

/// Setting this variable disables logging entirely (used by tests and scripted runs)
pub const NO_LOGS_ENV: &str = "FX_NO_LOGS";

const LOG_DIR_ENV: &str = "FX_LOG_DIR";

fn get_log_file_path(log_file: &str) -> String {
    let mut path = env::var(LOG_DIR_ENV).unwrap_or_else(|_| "./".into());
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(log_file);

    path
}

/// Console gets warnings and errors only, the file gets everything down to trace.
/// `console_level` overrides the console threshold, the dashboard lowers it to `Off`
/// so log lines don't interleave with the rendered table.
pub fn init_logger_file_named(log_file: &str) {
    init_logger_with_console_level(log_file, LevelFilter::Warn)
}

pub fn init_logger_with_console_level(log_file: &str, console_level: LevelFilter) {
    if env::var(NO_LOGS_ENV).is_ok() {
        return;
    }

    let path = get_log_file_path(log_file);
    static INIT_LOGGER: Once = Once::new();

    INIT_LOGGER.call_once(|| {
        let file = match std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) => {
                eprintln!("Unable to open log file {path}: {err}");
                return;
            }
        };

        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}][{}][{}] {}",
                    Utc::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(
                fern::Dispatch::new()
                    .level(console_level)
                    .chain(std::io::stdout()),
            )
            .chain(
                fern::Dispatch::new()
                    .level(LevelFilter::Trace)
                    .level_for("hyper", LevelFilter::Info)
                    .level_for("mio", LevelFilter::Warn)
                    .level_for("actix_server", LevelFilter::Info)
                    .level_for("rustls", LevelFilter::Warn)
                    .chain(file),
            )
            .apply();

        if let Err(err) = result {
            eprintln!("Unable to set up logger: {err}");
        }
    })
}

pub fn print_info<T>(msg: T)
where
    T: std::fmt::Display,
{
    log::info!("{msg}");
    println!("{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lands_in_configured_dir() {
        env::set_var(LOG_DIR_ENV, "/tmp/fx");
        assert_eq!(get_log_file_path("rate_api_log.txt"), "/tmp/fx/rate_api_log.txt");

        env::set_var(LOG_DIR_ENV, "/var/log/");
        assert_eq!(get_log_file_path("log.txt"), "/var/log/log.txt");

        env::remove_var(LOG_DIR_ENV);
    }
}
