//! Unit name resolution
//!
//! One policy for every category: trim, fold case, and treat any run of
//! whitespace or underscores as a single separator. "nautical mile",
//! "Nautical_Mile" and "  NAUTICAL   MILE " all reach the same unit.

use conversor_core::ConversionError;
use crate::UnitDef;
use crate::units::CategoryRegistry;

/// Normalize a unit name into a registry key
pub fn canonical_key(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve a caller-supplied name against a registry
pub fn resolve<'a>(registry: &'a CategoryRegistry, raw: &str) -> Result<&'a UnitDef, ConversionError> {
    let key = canonical_key(raw);

    if key.is_empty() {
        return Err(ConversionError::unit_not_found(registry.category(), raw.trim()));
    }

    registry
        .get(&key)
        .ok_or_else(|| ConversionError::unit_not_found(registry.category(), raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conversor_core::Category;
    use crate::units::BUILTIN;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("Nautical Mile"), "nautical_mile");
        assert_eq!(canonical_key("  nautical   mile "), "nautical_mile");
        assert_eq!(canonical_key("NAUTICAL_MILE"), "nautical_mile");
        assert_eq!(canonical_key("Metric__Ton"), "metric_ton");
        assert_eq!(canonical_key("°C"), "°c");
        assert_eq!(canonical_key("   "), "");
    }

    #[test]
    fn test_resolve_display_names() {
        let length = BUILTIN.registry(Category::Length);
        for name in length.unit_names() {
            assert_eq!(resolve(length, name).unwrap().name, name);
        }
    }

    #[test]
    fn test_resolve_normalized_spellings() {
        let length = BUILTIN.registry(Category::Length);
        assert_eq!(resolve(length, "  nautical   mile ").unwrap().name, "Nautical Mile");
        assert_eq!(resolve(length, "NAUTICAL_MILE").unwrap().name, "Nautical Mile");
        assert_eq!(resolve(length, "kilometer").unwrap().name, "Kilometer");

        let mass = BUILTIN.registry(Category::Mass);
        assert_eq!(resolve(mass, "short ton").unwrap().name, "Short Ton");
        assert_eq!(resolve(mass, "Long_Ton").unwrap().name, "Long Ton");
    }

    #[test]
    fn test_resolve_currency_case_folds() {
        let currency = BUILTIN.registry(Category::Currency);
        assert_eq!(resolve(currency, "eur").unwrap().name, "EUR");
        assert_eq!(resolve(currency, " Mxn ").unwrap().name, "MXN");
    }

    #[test]
    fn test_resolve_temperature_symbols() {
        let temperature = BUILTIN.registry(Category::Temperature);
        assert_eq!(resolve(temperature, "°F").unwrap().name, "Fahrenheit");
        assert_eq!(resolve(temperature, "k").unwrap().name, "Kelvin");
        assert_eq!(resolve(temperature, "celsius").unwrap().name, "Celsius");
    }

    #[test]
    fn test_unknown_unit_in_every_category() {
        for category in Category::ALL {
            let err = resolve(BUILTIN.registry(category), "nonexistent-unit").unwrap_err();
            assert_eq!(err, ConversionError::unit_not_found(category, "nonexistent-unit"));
        }
    }

    #[test]
    fn test_units_do_not_cross_categories() {
        let err = resolve(BUILTIN.registry(Category::Mass), "Meter").unwrap_err();
        assert!(matches!(err, ConversionError::UnitNotFound { category: Category::Mass, .. }));
    }

    #[test]
    fn test_empty_name() {
        let err = resolve(BUILTIN.registry(Category::Length), "  ").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found(Category::Length, ""));

        let err = resolve(BUILTIN.registry(Category::Length), " _ ").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found(Category::Length, "_"));
    }
}
