//! Unit representation with affine conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};

/// One unit of a category, defined relative to the category's base unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// Display name, unique within its category (e.g., "Nautical Mile")
    pub name: String,
    /// Factor to the base unit (base = value * scale + offset)
    pub scale: f64,
    /// Offset to the base unit; only non-zero for temperatures
    pub offset: f64,
    /// Display symbol (e.g., "°C"), if the unit has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl UnitDef {
    /// Create a unit with proportional conversion (no offset)
    pub fn new(name: &str, scale: f64) -> Self {
        UnitDef {
            name: name.to_string(),
            scale,
            offset: 0.0,
            symbol: None,
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(name: &str, scale: f64, offset: f64) -> Self {
        UnitDef {
            name: name.to_string(),
            scale,
            offset,
            symbol: None,
        }
    }

    /// Builder: attach a display symbol
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Check if this is the base unit of its category
    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Check if conversion is a pure ratio (no offset)
    pub fn is_multiplicative(&self) -> bool {
        self.offset == 0.0
    }

    /// Convert a value from this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        self.scale * value + self.offset
    }

    /// Convert a value from the base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }

    /// Convert a value from this unit to another unit of the same category
    pub fn convert_to(&self, value: f64, target: &UnitDef) -> f64 {
        if self == target {
            return value;
        }

        if self.is_multiplicative() && target.is_multiplicative() {
            // Direct ratio, skips the round trip through the base unit
            return value * self.scale / target.scale;
        }

        target.from_base(self.to_base(value))
    }
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> UnitDef {
        UnitDef::new("Meter", 1.0)
    }

    fn kilometer() -> UnitDef {
        UnitDef::new("Kilometer", 1000.0)
    }

    fn celsius() -> UnitDef {
        UnitDef::with_offset("Celsius", 1.0, 273.15).with_symbol("°C")
    }

    fn kelvin() -> UnitDef {
        UnitDef::new("Kelvin", 1.0).with_symbol("K")
    }

    #[test]
    fn test_base_unit() {
        assert!(meter().is_base());
        assert!(!kilometer().is_base());
        assert!(!celsius().is_base());
        assert!(kelvin().is_base());
    }

    #[test]
    fn test_to_base_conversion() {
        assert_eq!(kilometer().to_base(5.0), 5000.0);
        assert_eq!(celsius().to_base(0.0), 273.15);
    }

    #[test]
    fn test_from_base_conversion() {
        assert_eq!(kilometer().from_base(5000.0), 5.0);
        assert_eq!(celsius().from_base(273.15), 0.0);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(meter().convert_to(5000.0, &kilometer()), 5.0);
        assert_eq!(kilometer().convert_to(2.5, &meter()), 2500.0);
        assert_eq!(celsius().convert_to(0.0, &kelvin()), 273.15);
    }

    #[test]
    fn test_identity_is_exact() {
        let c = celsius();
        for v in [0.0, -40.0, 36.6, 1e12] {
            assert_eq!(c.convert_to(v, &c), v);
        }
    }

    #[test]
    fn test_symbol() {
        assert_eq!(celsius().symbol.as_deref(), Some("°C"));
        assert_eq!(meter().symbol, None);
    }
}
