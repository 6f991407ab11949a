//! Conversor - Measurement-unit conversion engine
//!
//! The caller-facing surface: pick a category, list its units, convert a
//! value between two of them, and render the result for display.
//!
//! ```
//! use conversor::{Conversor, Category};
//!
//! let conversor = Conversor::with_builtin_units();
//! let result = conversor.convert(Some(Category::Temperature), "100", "Celsius", "Fahrenheit").unwrap();
//! assert_eq!(conversor.format(&result), "212.00");
//! ```

mod config;

pub use config::{ConversorConfig, SameUnitPolicy};
pub use conversor_core::{Amount, Category, ConversionError, ErrorReport, RegistryError, codes};
pub use conversor_units::{
    Catalog, CategoryRegistry, ConversionRequest, ConversionResult, Formatter, UnitDef,
    CURRENCY_RATES_AS_OF, MAX_PRECISION,
};

use conversor_units::{currency_table, execute, resolve, symbol_for};
use std::sync::Arc;

/// Main conversion engine
#[derive(Debug, Clone)]
pub struct Conversor {
    catalog: Arc<Catalog>,
    formatter: Formatter,
    same_unit: SameUnitPolicy,
}

impl Conversor {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            formatter: Formatter::new(),
            same_unit: SameUnitPolicy::default(),
        }
    }

    pub fn with_builtin_units() -> Self {
        Self::new(Catalog::builtin())
    }

    pub fn with_same_unit_policy(mut self, policy: SameUnitPolicy) -> Self {
        self.same_unit = policy;
        self
    }

    pub fn with_precision(mut self, category: Category, decimals: usize) -> Self {
        self.formatter = self.formatter.with_precision(category, decimals);
        self
    }

    pub fn with_config(self, config: &ConversorConfig) -> Self {
        let mut conversor = self.with_same_unit_policy(config.same_unit);
        for (category, decimals) in &config.precision {
            conversor = conversor.with_precision(*category, *decimals);
        }
        conversor
    }

    /// Replace the currency snapshot with new (code, rate-in-USD) pairs
    pub fn with_currency_rates(mut self, rates: &[(&str, f64)]) -> Result<Self, RegistryError> {
        let registry = CategoryRegistry::from_table(Category::Currency, currency_table(rates), &[])?;
        let catalog = self.catalog.as_ref().clone().with_registry(registry);
        self.catalog = Arc::new(catalog);
        Ok(self)
    }

    pub fn list_categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Unit display names for a category, in table order
    pub fn list_unit_names(&self, category: Category) -> Vec<&str> {
        self.catalog.registry(category).unit_names()
    }

    pub fn registry(&self, category: Category) -> &CategoryRegistry {
        self.catalog.registry(category)
    }

    pub fn resolve(&self, category: Category, name: &str) -> Result<&UnitDef, ConversionError> {
        resolve(self.catalog.registry(category), name)
    }

    /// Convert a value between two units of the selected category
    pub fn convert(
        &self,
        category: Option<Category>,
        value: impl Into<Amount>,
        origin: &str,
        destination: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let category = category.ok_or(ConversionError::MissingSelection)?;
        self.execute(&ConversionRequest::new(category, value, origin, destination))
    }

    pub fn execute(&self, request: &ConversionRequest) -> Result<ConversionResult, ConversionError> {
        let result = execute(self.catalog.registry(request.category), request)?;

        if self.same_unit == SameUnitPolicy::Reject && result.origin == result.destination {
            return Err(ConversionError::SameUnitSelection { unit: result.origin.name });
        }

        Ok(result)
    }

    /// Symbol of a temperature unit
    pub fn symbol_for(&self, name: &str) -> Result<&str, ConversionError> {
        symbol_for(&self.catalog, name)
    }

    /// The converted value with the category's display precision
    pub fn format(&self, result: &ConversionResult) -> String {
        self.formatter.render_value(result)
    }

    /// The full "X origin are Y destination" result line
    pub fn describe(&self, result: &ConversionResult) -> String {
        self.formatter.render_sentence(result)
    }
}

impl Default for Conversor {
    fn default() -> Self {
        Self::with_builtin_units()
    }
}
