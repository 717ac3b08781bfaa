pub mod consolidated_rate;
pub mod forex_rates;
