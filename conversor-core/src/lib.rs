//! Conversor Core - Fundamental types
//!
//! This crate provides the core types used throughout Conversor:
//! - `Category`: The four measurement categories
//! - `Amount`: Caller-supplied numeric input (text or number)
//! - `ConversionError`: Typed errors with machine-readable codes

mod category;
mod number;
mod error;

pub use category::Category;
pub use number::{Amount, parse_amount};
pub use error::{ConversionError, RegistryError, ErrorReport, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Amount, Category, ConversionError, RegistryError, ErrorReport};
    pub use crate::error::codes;
}
