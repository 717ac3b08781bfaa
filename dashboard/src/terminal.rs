//! Line-oriented front-end: reads commands, drives the [`Dashboard`] and prints its state.

use std::str::FromStr;
use std::sync::Arc;

use fx_domain::currency::CurrencyCode;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api_client::RatesApi;
use crate::controller::Dashboard;
use crate::table::{render_converter, render_rates_table};

pub const HELP: &str = "\
Commands:
  refresh          reload rates of all sources
  update <CUR>     requote <CUR> at the first source, then reload
  from <CUR>       convert from <CUR>
  to <CUR>         convert to <CUR>
  swap             exchange 'from' and 'to'
  amount <X>       set the amount to convert
  convert          convert with the consolidated rate
  show             print converter and rates table
  help             print this help
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Update(CurrencyCode),
    From(CurrencyCode),
    To(CurrencyCode),
    Swap,
    Amount(String),
    Convert,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("'{0}' needs a currency code")]
    MissingCurrency(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (line, ""),
        };

        let currency = |command: &'static str| {
            if argument.is_empty() {
                Err(CommandError::MissingCurrency(command))
            } else {
                Ok(CurrencyCode::from(argument))
            }
        };

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "refresh" => Ok(Command::Refresh),
            "update" => Ok(Command::Update(currency("update")?)),
            "from" => Ok(Command::From(currency("from")?)),
            "to" => Ok(Command::To(currency("to")?)),
            "swap" => Ok(Command::Swap),
            "amount" => Ok(Command::Amount(argument.to_owned())),
            "convert" => Ok(Command::Convert),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}

fn show<Api: RatesApi>(dashboard: &Dashboard<Api>) {
    let state = dashboard.state();
    println!("{}\n", render_converter(&state));
    println!("{}", render_rates_table(&state, dashboard.encodings()));
}

/// Fetches rates once, then serves commands from `input` until `quit` or end of input.
/// Row updates run as separate tasks so several of them can be in flight at once.
pub async fn run<Api, R>(dashboard: Arc<Dashboard<Api>>, input: R) -> anyhow::Result<()>
where
    Api: RatesApi + 'static,
    R: AsyncBufRead + Unpin,
{
    if dashboard.fetch_rates().await.is_err() {
        println!("Unable to load rates, see the log for details");
    }
    show(&dashboard);

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        match command {
            Command::Refresh => {
                if dashboard.fetch_rates().await.is_err() {
                    println!("Unable to refresh rates, showing the last loaded ones");
                }
                show(&dashboard);
            }
            Command::Update(currency) => {
                println!("Updating {currency}...");
                let dashboard = dashboard.clone();
                let _ = tokio::spawn(async move {
                    match dashboard.update_row(&currency).await {
                        Ok(()) => println!("{currency} updated, 'show' to see the table"),
                        Err(error) => println!("Update of {currency} failed: {error}"),
                    }
                });
            }
            Command::From(currency) => {
                dashboard.select_from(currency);
                println!("{}", render_converter(&dashboard.state()));
            }
            Command::To(currency) => {
                dashboard.select_to(currency);
                println!("{}", render_converter(&dashboard.state()));
            }
            Command::Swap => {
                dashboard.swap();
                println!("{}", render_converter(&dashboard.state()));
            }
            Command::Amount(value) => {
                if !dashboard.input_amount(value.as_str()) {
                    println!("Amount '{value}' ignored, digits and one decimal point only");
                }
            }
            Command::Convert => match dashboard.convert().await {
                Ok(Some(_)) => println!("{}", render_converter(&dashboard.state())),
                Ok(None) => println!("Amount, 'from' and 'to' must all be set"),
                Err(error) => println!("Conversion failed: {error}"),
            },
            Command::Show => show(&dashboard),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
