//! Presentation formatting
//!
//! Fixed decimals per category, `,` as thousands separator, and the
//! "X origin are Y destination" result line shown to users.

use conversor_core::{Category, ConversionError};
use crate::UnitDef;
use crate::convert::ConversionResult;
use crate::parse::resolve;
use crate::units::Catalog;

/// Most decimals any category may display
pub const MAX_PRECISION: usize = 12;

/// Format with a fixed number of decimals and thousands separators
///
/// `decimals` is capped at [`MAX_PRECISION`].
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let decimals = decimals.min(MAX_PRECISION);
    let digits = format!("{:.*}", decimals, value.abs());
    // Values that round to zero lose their sign ("-0.00" -> "0.00")
    let negative = value < 0.0 && digits.bytes().any(|b| (b'1'..=b'9').contains(&b));
    with_separators(&digits, negative)
}

/// Format an input value the way it was entered: shortest exact digits,
/// thousands separators, and at least one decimal (`1234` -> `1,234.0`)
pub fn format_input(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut digits = format!("{}", value.abs());
    if !digits.contains('.') {
        digits.push_str(".0");
    }
    with_separators(&digits, value < 0.0)
}

fn with_separators(digits: &str, negative: bool) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Symbol of a temperature unit ("°C", "°F" or "K")
pub fn symbol_for<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a str, ConversionError> {
    let unit = resolve(catalog.registry(Category::Temperature), name)?;
    Ok(unit.symbol.as_deref().unwrap_or(unit.name.as_str()))
}

/// Renders conversion results with per-category precision
#[derive(Debug, Clone)]
pub struct Formatter {
    precision: [usize; 4],
}

impl Formatter {
    pub fn new() -> Self {
        Formatter {
            precision: Category::ALL.map(|c| c.precision()),
        }
    }

    /// Builder: override the decimals shown for one category, capped at
    /// [`MAX_PRECISION`]
    pub fn with_precision(mut self, category: Category, decimals: usize) -> Self {
        self.precision[Self::slot(category)] = decimals.min(MAX_PRECISION);
        self
    }

    pub fn precision(&self, category: Category) -> usize {
        self.precision[Self::slot(category)]
    }

    /// The converted value alone (e.g., "1,923.08")
    pub fn render_value(&self, result: &ConversionResult) -> String {
        format_fixed(result.value, self.precision(result.category))
    }

    /// The full result line (e.g., "0.0 °C Celsius are 32.00 °F Fahrenheit")
    pub fn render_sentence(&self, result: &ConversionResult) -> String {
        format!(
            "{} {} are {} {}",
            format_input(result.input),
            labelled(&result.origin),
            self.render_value(result),
            labelled(&result.destination),
        )
    }

    fn slot(category: Category) -> usize {
        Category::ALL.iter().position(|c| *c == category).unwrap_or(0)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

fn labelled(unit: &UnitDef) -> String {
    match &unit.symbol {
        Some(symbol) => format!("{} {}", symbol, unit.name),
        None => unit.name.clone(),
    }
}
