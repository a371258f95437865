//! Vendor prefix expansion.
//!
//! A [`Prefixer`] derives the vendor-specific variants of a single
//! declaration. The injection engine calls it once per distinct
//! property/value pair and caches the result.

mod static_prefixer;

pub use static_prefixer::StaticPrefixer;

use crate::types::StyleValue;

/// Expands one declaration into its vendor-prefixed variants.
///
/// The output is an ordered list of `(property, value)` pairs. Property names
/// are camel case (`WebkitTransform`, `msUserSelect`) or hyphenated; values
/// may be arrays when a property needs several fallback values.
///
/// Implementations must be pure: the engine caches results keyed on the
/// input property and value.
pub trait Prefixer: Send + Sync {
    /// Expand a single `property: value` declaration.
    fn expand(&self, property: &str, value: &StyleValue) -> Vec<(String, StyleValue)>;
}

/// A prefixer that returns every declaration unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrefixer;

impl Prefixer for NoPrefixer {
    fn expand(&self, property: &str, value: &StyleValue) -> Vec<(String, StyleValue)> {
        vec![(property.to_string(), value.clone())]
    }
}

impl<F> Prefixer for F
where
    F: Fn(&str, &StyleValue) -> Vec<(String, StyleValue)> + Send + Sync,
{
    fn expand(&self, property: &str, value: &StyleValue) -> Vec<(String, StyleValue)> {
        self(property, value)
    }
}
