//! Text rendering of the converter panel and the rates comparison table.

use fx_domain::currencies::available_currencies;
use fx_domain::encoding::ProviderEncodings;
use fx_domain::rates::RateQuote;
use fx_domain::Rate;
use itertools::Itertools;
use rust_decimal::RoundingStrategy;

use crate::state::DashboardState;

const QUOTE_DECIMAL_PLACES: u32 = 4;
const MISSING_QUOTE: &str = "-";
const CURRENCY_HEADER: &str = "Currency";
const ACTIONS_HEADER: &str = "Actions";
const UPDATING_MARKER: &str = "updating";

pub fn render_converter(state: &DashboardState) -> String {
    let selection = format!(
        "{} {} -> {} {}",
        state.from_currency.flag(),
        state.from_currency,
        state.to_currency.flag(),
        state.to_currency
    );

    match &state.converted_amount {
        Some(converted) => format!(
            "{selection}\n{} {} = {converted} {}",
            state.amount, state.from_currency, state.to_currency
        ),
        None => format!("{selection}\nAmount: {}", state.amount),
    }
}

fn format_rate(rate: Rate) -> String {
    let rounded =
        rate.round_dp_with_strategy(QUOTE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.4}")
}

fn quote_cells(quote: Option<&RateQuote>) -> (String, String) {
    match quote {
        Some(quote) => (format_rate(quote.buy_rate), format_rate(quote.sell_rate)),
        None => (MISSING_QUOTE.to_owned(), MISSING_QUOTE.to_owned()),
    }
}

/// One row per currency any source quotes, one Buy/Sell column pair per source.
/// Flags go last so that emoji widths don't break the column alignment.
pub fn render_rates_table(state: &DashboardState, encodings: &ProviderEncodings) -> String {
    let title = if state.loading {
        "Exchange Rates (refreshing)"
    } else {
        "Exchange Rates"
    };

    if state.rates.is_empty() {
        return format!("{title}\nNo rates loaded");
    }

    let currencies = available_currencies(&state.rates, encodings);
    let rows = currencies
        .iter()
        .map(|currency| {
            let cells = state
                .rates
                .iter()
                .map(|source| quote_cells(source.quote_for(encodings, currency)))
                .collect_vec();
            (currency, cells)
        })
        .collect_vec();

    let code_width = currencies
        .iter()
        .map(|currency| currency.as_str().chars().count())
        .chain([CURRENCY_HEADER.len()])
        .max()
        .unwrap_or(CURRENCY_HEADER.len());
    let value_width = rows
        .iter()
        .flat_map(|(_, cells)| cells.iter())
        .flat_map(|(buy, sell)| [buy.len(), sell.len()])
        .chain(["Sell".len()])
        .max()
        .unwrap_or(0);
    let source_widths = state
        .rates
        .iter()
        .map(|source| source.source.chars().count().max(2 * value_width + 1))
        .collect_vec();

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(title.to_owned());

    let sources_header = state
        .rates
        .iter()
        .zip(&source_widths)
        .map(|(source, &width)| format!("{:<width$}", source.source))
        .join(" | ");
    lines.push(format!(
        "{CURRENCY_HEADER:<code_width$} | {sources_header} | {ACTIONS_HEADER}"
    ));

    let sides_header = source_widths
        .iter()
        .map(|width| {
            format!(
                "{:<value_width$} {:<rest$}",
                "Buy",
                "Sell",
                rest = width - value_width - 1
            )
        })
        .join(" | ");
    lines.push(format!("{:<code_width$} | {sides_header} |", ""));

    for (currency, cells) in rows {
        let quotes = cells
            .iter()
            .zip(&source_widths)
            .map(|((buy, sell), width)| {
                format!("{buy:<value_width$} {sell:<rest$}", rest = width - value_width - 1)
            })
            .join(" | ");
        let action = if state.is_updating(currency) {
            UPDATING_MARKER
        } else {
            ""
        };
        lines.push(format!(
            "{:<code_width$} | {quotes} | {action:<action_width$} {}",
            currency.as_str(),
            currency.flag(),
            action_width = ACTIONS_HEADER.len().max(UPDATING_MARKER.len()),
        ));
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .join("\n")
}
