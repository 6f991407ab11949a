//! Unit definitions - the four category registries and their built-in tables

use std::collections::HashMap;
use std::sync::LazyLock;
use conversor_core::{Category, RegistryError};
use crate::UnitDef;
use crate::parse::canonical_key;

/// Date of the built-in currency snapshot (rates relative to USD)
pub const CURRENCY_RATES_AS_OF: &str = "2025-05-26";

/// Global catalog with the built-in tables, read-only after first use
pub static BUILTIN: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

// Length, base = Meter
const LENGTH_UNITS: [(&str, f64); 11] = [
    ("Nanometer", 1e-9),
    ("Micron", 1e-6),
    ("Millimeter", 1e-3),
    ("Centimeter", 1e-2),
    ("Meter", 1.0),
    ("Kilometer", 1e3),
    ("Inch", 0.0254),
    ("Foot", 0.3048),
    ("Yard", 0.9144),
    ("Mile", 1609.34),
    ("Nautical Mile", 1852.0),
];

const LENGTH_ALIASES: [(&str, &str); 17] = [
    ("nm", "Nanometer"),
    ("um", "Micron"),
    ("µm", "Micron"),
    ("Micrometer", "Micron"),
    ("mm", "Millimeter"),
    ("cm", "Centimeter"),
    ("m", "Meter"),
    ("Metre", "Meter"),
    ("km", "Kilometer"),
    ("in", "Inch"),
    ("Inche", "Inch"),
    ("Inches", "Inch"),
    ("ft", "Foot"),
    ("Feet", "Foot"),
    ("yd", "Yard"),
    ("mi", "Mile"),
    ("nmi", "Nautical Mile"),
];

// Mass, base = Gram
const MASS_UNITS: [(&str, f64); 14] = [
    ("Carat", 0.02),
    ("Milligram", 1e-3),
    ("Centigram", 1e-2),
    ("Decigram", 0.1),
    ("Gram", 1.0),
    ("Decagram", 10.0),
    ("Hectogram", 100.0),
    ("Kilogram", 1000.0),
    ("Metric Ton", 1e6),
    ("Ounce", 28.3495),
    ("Pound", 453.592),
    ("Stone", 6350.29),
    ("Short Ton", 907185.0),
    ("Long Ton", 1016047.0),
];

const MASS_ALIASES: [(&str, &str); 14] = [
    ("ct", "Carat"),
    ("mg", "Milligram"),
    ("cg", "Centigram"),
    ("dg", "Decigram"),
    ("g", "Gram"),
    ("dag", "Decagram"),
    ("hg", "Hectogram"),
    ("kg", "Kilogram"),
    ("t", "Metric Ton"),
    ("Tonne", "Metric Ton"),
    ("oz", "Ounce"),
    ("lb", "Pound"),
    ("lbs", "Pound"),
    ("st", "Stone"),
];

const TEMPERATURE_ALIASES: [(&str, &str); 5] = [
    ("°C", "Celsius"),
    ("C", "Celsius"),
    ("°F", "Fahrenheit"),
    ("F", "Fahrenheit"),
    ("K", "Kelvin"),
];

// Currency, base = USD. 1 unit of the currency = rate USD.
const CURRENCY_RATES: [(&str, f64); 8] = [
    ("USD", 1.0),
    ("MXN", 0.052),
    ("EUR", 1.14),
    ("GBP", 1.36),
    ("JPY", 0.007),
    ("KRW", 0.00073),
    ("CAD", 0.73),
    ("AUD", 0.65),
];

/// Temperature table, base = Kelvin
fn temperature_units() -> Vec<UnitDef> {
    let fahrenheit_scale = 5.0 / 9.0;
    vec![
        UnitDef::with_offset("Celsius", 1.0, 273.15).with_symbol("°C"),
        // K = (F - 32) * 5/9 + 273.15
        UnitDef::with_offset("Fahrenheit", fahrenheit_scale, 273.15 - 32.0 * fahrenheit_scale)
            .with_symbol("°F"),
        UnitDef::new("Kelvin", 1.0).with_symbol("K"),
    ]
}

fn ratio_units(table: &[(&str, f64)]) -> Vec<UnitDef> {
    table.iter().map(|(name, scale)| UnitDef::new(name, *scale)).collect()
}

/// Build a currency table from (code, rate-in-USD) pairs
pub fn currency_table(rates: &[(&str, f64)]) -> Vec<UnitDef> {
    rates.iter().map(|(code, rate)| UnitDef::new(&code.to_uppercase(), *rate)).collect()
}

/// Ordered set of units sharing one base unit
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    category: Category,
    units: Vec<UnitDef>,
    index: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    base: usize,
}

impl CategoryRegistry {
    /// Build a registry, checking every table invariant
    pub fn from_table(
        category: Category,
        units: Vec<UnitDef>,
        aliases: &[(&str, &str)],
    ) -> Result<Self, RegistryError> {
        if units.is_empty() {
            return Err(RegistryError::EmptyTable);
        }

        let mut index = HashMap::new();
        let mut base: Option<usize> = None;

        for (i, unit) in units.iter().enumerate() {
            if !unit.scale.is_finite() || !unit.offset.is_finite() {
                return Err(RegistryError::NonFiniteFactor { unit: unit.name.clone() });
            }
            if unit.scale == 0.0 {
                return Err(RegistryError::DegenerateScale { unit: unit.name.clone() });
            }
            if index.insert(canonical_key(&unit.name), i).is_some() {
                return Err(RegistryError::DuplicateUnit { unit: unit.name.clone() });
            }
            if unit.is_base() {
                if let Some(first) = base {
                    return Err(RegistryError::MultipleBases {
                        first: units[first].name.clone(),
                        second: unit.name.clone(),
                    });
                }
                base = Some(i);
            }
        }

        let base = base.ok_or(RegistryError::MissingBase)?;

        let mut alias_index = HashMap::new();
        for (alias, target) in aliases {
            let position = *index.get(&canonical_key(target)).ok_or_else(|| {
                RegistryError::UnknownAliasTarget {
                    alias: alias.to_string(),
                    target: target.to_string(),
                }
            })?;
            let key = canonical_key(alias);
            if index.contains_key(&key) || alias_index.insert(key, position).is_some() {
                return Err(RegistryError::DuplicateUnit { unit: alias.to_string() });
            }
        }

        tracing::debug!(
            category = %category,
            units = units.len(),
            aliases = alias_index.len(),
            base = %units[base].name,
            "unit registry built"
        );

        Ok(CategoryRegistry {
            category,
            units,
            index,
            aliases: alias_index,
            base,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Display names in table order
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    /// The unit with scale 1 and offset 0
    pub fn base(&self) -> &UnitDef {
        &self.units[self.base]
    }

    /// Get a unit by canonical key, falling back to aliases
    pub fn get(&self, key: &str) -> Option<&UnitDef> {
        self.index
            .get(key)
            .or_else(|| self.aliases.get(key))
            .map(|&i| &self.units[i])
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// The four category registries
#[derive(Debug, Clone)]
pub struct Catalog {
    registries: Vec<CategoryRegistry>,
}

impl Catalog {
    /// Catalog populated from the built-in tables
    pub fn builtin() -> Self {
        let registries = vec![
            CategoryRegistry::from_table(Category::Length, ratio_units(&LENGTH_UNITS), &LENGTH_ALIASES),
            CategoryRegistry::from_table(Category::Mass, ratio_units(&MASS_UNITS), &MASS_ALIASES),
            CategoryRegistry::from_table(Category::Temperature, temperature_units(), &TEMPERATURE_ALIASES),
            CategoryRegistry::from_table(Category::Currency, currency_table(&CURRENCY_RATES), &[]),
        ];

        Catalog {
            registries: registries
                .into_iter()
                .map(|r| r.expect("built-in unit tables are valid"))
                .collect(),
        }
    }

    /// Get the registry for a category
    pub fn registry(&self, category: Category) -> &CategoryRegistry {
        &self.registries[Self::slot(category)]
    }

    /// Replace the registry of one category (e.g. refreshed currency rates)
    pub fn with_registry(mut self, registry: CategoryRegistry) -> Self {
        let slot = Self::slot(registry.category());
        self.registries[slot] = registry;
        self
    }

    fn slot(category: Category) -> usize {
        match category {
            Category::Length => 0,
            Category::Mass => 1,
            Category::Temperature => 2,
            Category::Currency => 3,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
