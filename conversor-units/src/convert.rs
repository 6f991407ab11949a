//! Conversion engine
//!
//! Every category goes through the same affine transform:
//!
//! ```text
//! base   = origin.scale * value + origin.offset
//! result = (base - dest.offset) / dest.scale
//! ```
//!
//! Length, mass and currency have zero offsets and reduce to a ratio.

use serde::{Serialize, Deserialize};
use conversor_core::{Amount, Category, ConversionError, parse_amount};
use crate::UnitDef;
use crate::parse::resolve;
use crate::units::CategoryRegistry;

/// A conversion asked for by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    pub value: Amount,
    pub origin: String,
    pub destination: String,
}

impl ConversionRequest {
    pub fn new(
        category: Category,
        value: impl Into<Amount>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        ConversionRequest {
            category,
            value: value.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Outcome of a conversion, with the resolved units for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub category: Category,
    /// The parsed input value
    pub input: f64,
    /// The converted value, full double precision
    pub value: f64,
    pub origin: UnitDef,
    pub destination: UnitDef,
}

/// Convert a value between two named units of one registry
pub fn convert(
    registry: &CategoryRegistry,
    value: f64,
    origin: &str,
    destination: &str,
) -> Result<f64, ConversionError> {
    let from = resolve(registry, origin)?;
    let to = resolve(registry, destination)?;
    Ok(from.convert_to(value, to))
}

/// Run a full request: parse the amount, resolve both names, convert
pub fn execute(
    registry: &CategoryRegistry,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
    // Amount first, so a bad number is reported even when the units are bad too
    let input = parse_amount(&request.value)?;

    let from = resolve(registry, &request.origin)?;
    let to = resolve(registry, &request.destination)?;
    let value = from.convert_to(input, to);

    tracing::debug!(
        category = %registry.category(),
        from = %from,
        to = %to,
        input,
        value,
        "converted"
    );

    Ok(ConversionResult {
        category: registry.category(),
        input,
        value,
        origin: from.clone(),
        destination: to.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::BUILTIN;
    use crate::format::format_fixed;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {}, got {}", expected, actual
        );
    }

    fn conv(category: Category, value: f64, from: &str, to: &str) -> f64 {
        convert(BUILTIN.registry(category), value, from, to).unwrap()
    }

    #[test]
    fn test_identity_for_every_unit() {
        for category in Category::ALL {
            let registry = BUILTIN.registry(category);
            for name in registry.unit_names() {
                for v in [0.0, 1.0, -17.5, 123456.789, 1e-7] {
                    assert_eq!(convert(registry, v, name, name).unwrap(), v, "{} {}", category, name);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_for_every_pair() {
        for category in Category::ALL {
            let registry = BUILTIN.registry(category);
            for a in registry.unit_names() {
                for b in registry.unit_names() {
                    let v = 42.125;
                    let there = convert(registry, v, a, b).unwrap();
                    let back = convert(registry, there, b, a).unwrap();
                    assert_close(back, v);
                }
            }
        }
    }

    #[test]
    fn test_multiplicative_is_ratio() {
        for category in [Category::Length, Category::Mass, Category::Currency] {
            let registry = BUILTIN.registry(category);
            for a in registry.units() {
                for b in registry.units() {
                    let v = 3.5;
                    let expected = if a == b { v } else { v * a.scale / b.scale };
                    assert_eq!(convert(registry, v, &a.name, &b.name).unwrap(), expected);
                }
            }
        }
    }

    // Offset units go through the base, which leaves drift in the last bits
    // (0 °C is 31.999999999999986 °F); the displayed value is exact.
    #[test]
    fn test_temperature() {
        assert_close(conv(Category::Temperature, 0.0, "Celsius", "Fahrenheit"), 32.0);
        assert_eq!(format_fixed(conv(Category::Temperature, 0.0, "Celsius", "Fahrenheit"), 2), "32.00");
        assert_close(conv(Category::Temperature, 100.0, "Celsius", "Fahrenheit"), 212.0);
        assert_eq!(format_fixed(conv(Category::Temperature, 100.0, "Celsius", "Fahrenheit"), 2), "212.00");
        assert_close(conv(Category::Temperature, 0.0, "Celsius", "Kelvin"), 273.15);
        assert_close(conv(Category::Temperature, 32.0, "Fahrenheit", "Celsius"), 0.0);
        assert_close(conv(Category::Temperature, -40.0, "Fahrenheit", "Celsius"), -40.0);
        assert_close(conv(Category::Temperature, 0.0, "Kelvin", "Fahrenheit"), -459.67);
        assert_close(conv(Category::Temperature, 212.0, "Fahrenheit", "Kelvin"), 373.15);
    }

    #[test]
    fn test_negative_kelvin_is_not_rejected() {
        assert_close(conv(Category::Temperature, -10.0, "Kelvin", "Celsius"), -283.15);
    }

    #[test]
    fn test_mass() {
        assert_eq!(conv(Category::Mass, 1.0, "Kilogram", "Gram"), 1000.0);
        assert_close(conv(Category::Mass, 1.0, "Pound", "Gram"), 453.592);
        assert_close(conv(Category::Mass, 2.0, "Metric Ton", "Kilogram"), 2000.0);
    }

    #[test]
    fn test_length() {
        assert_eq!(conv(Category::Length, 1.0, "Kilometer", "Meter"), 1000.0);
        assert_close(conv(Category::Length, 12.0, "Inch", "Foot"), 1.0);
        assert_close(conv(Category::Length, 1.0, "Nautical Mile", "Kilometer"), 1.852);
    }

    #[test]
    fn test_currency() {
        assert_close(conv(Category::Currency, 100.0, "EUR", "USD"), 114.0);
        assert_eq!(format_fixed(conv(Category::Currency, 100.0, "EUR", "USD"), 2), "114.00");
        assert_close(conv(Category::Currency, 100.0, "USD", "MXN"), 100.0 / 0.052);
        assert_close(conv(Category::Currency, 0.0, "GBP", "JPY"), 0.0);
        assert_close(conv(Category::Currency, -5.0, "USD", "EUR"), -5.0 / 1.14);
    }

    #[test]
    fn test_unknown_units() {
        let registry = BUILTIN.registry(Category::Length);
        let err = convert(registry, 1.0, "Meter", "Furlong").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found(Category::Length, "Furlong"));
        let err = convert(registry, 1.0, "Cubit", "Meter").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found(Category::Length, "Cubit"));
    }

    #[test]
    fn test_execute() {
        let request = ConversionRequest::new(Category::Mass, "2.5", "kilogram", "Gram");
        let result = execute(BUILTIN.registry(Category::Mass), &request).unwrap();
        assert_eq!(result.category, Category::Mass);
        assert_eq!(result.input, 2.5);
        assert_eq!(result.value, 2500.0);
        assert_eq!(result.origin.name, "Kilogram");
        assert_eq!(result.destination.name, "Gram");
    }

    #[test]
    fn test_invalid_number_before_unit_resolution() {
        let request = ConversionRequest::new(Category::Length, "not-a-number", "Cubit", "Furlong");
        let err = execute(BUILTIN.registry(Category::Length), &request).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidNumber { .. }));
    }
}
