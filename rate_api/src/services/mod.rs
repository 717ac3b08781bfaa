pub mod rate_generator;
pub mod rates_book;
