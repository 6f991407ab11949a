//! Engine configuration
//!
//! Environment variables (read once by the host process):
//! - `CONVERSOR_SAME_UNIT`: `allow` (default) or `reject`
//! - `CONVERSOR_PRECISION_<CATEGORY>`: decimals shown for one category,
//!   e.g. `CONVERSOR_PRECISION_CURRENCY=4`

use std::env;
use std::str::FromStr;
use conversor_core::Category;
use conversor_units::MAX_PRECISION;

/// What to do when origin and destination resolve to the same unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameUnitPolicy {
    /// Return the input unchanged
    #[default]
    Allow,
    /// Report `SameUnitSelection`
    Reject,
}

impl FromStr for SameUnitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(SameUnitPolicy::Allow),
            "reject" => Ok(SameUnitPolicy::Reject),
            other => Err(format!("expected 'allow' or 'reject', got '{}'", other)),
        }
    }
}

/// Settings a host can apply to a `Conversor`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversorConfig {
    pub same_unit: SameUnitPolicy,
    /// Per-category display precision overrides
    pub precision: Vec<(Category, usize)>,
}

impl ConversorConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConversorConfig::default();

        if let Some(raw) = lookup("CONVERSOR_SAME_UNIT") {
            match raw.parse() {
                Ok(policy) => config.same_unit = policy,
                Err(e) => tracing::warn!("ignoring CONVERSOR_SAME_UNIT: {}", e),
            }
        }

        for category in Category::ALL {
            let key = format!("CONVERSOR_PRECISION_{}", category.name().to_uppercase());
            if let Some(raw) = lookup(&key) {
                match raw.trim().parse::<usize>() {
                    Ok(decimals) if decimals <= MAX_PRECISION => config.precision.push((category, decimals)),
                    _ => tracing::warn!("ignoring {}: expected 0-{}, got '{}'", key, MAX_PRECISION, raw),
                }
            }
        }

        config
    }
}
