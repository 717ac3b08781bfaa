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

pub mod api;
pub mod currencies;
pub mod currency;
pub mod encoding;
pub mod rates;

pub type Rate = rust_decimal::Decimal;
pub type Amount = rust_decimal::Decimal;
