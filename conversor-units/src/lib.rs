//! Conversor Units - Unit registries and affine conversion
//!
//! Every unit is a (scale, offset) pair relative to its category's base unit,
//! so one algorithm covers ratio units and offset units alike.
//!
//! Categories:
//! - Length (base: Meter)
//! - Mass (base: Gram)
//! - Temperature (base: Kelvin; Celsius and Fahrenheit carry offsets)
//! - Currency (base: USD; static rate snapshot)

mod unit;
mod units;
mod parse;
mod convert;
mod format;

pub use unit::UnitDef;
pub use units::{CategoryRegistry, Catalog, BUILTIN, CURRENCY_RATES_AS_OF, currency_table};
pub use parse::{canonical_key, resolve};
pub use convert::{convert, execute, ConversionRequest, ConversionResult};
pub use format::{format_fixed, format_input, symbol_for, Formatter, MAX_PRECISION};
