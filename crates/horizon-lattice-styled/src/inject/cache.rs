//! Caches for prefix expansion and property-name hyphenation.
//!
//! Both caches are unbounded: their key space is limited by the distinct
//! style values an application uses.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Convert a camel-case property name to its CSS form.
///
/// A hyphen is inserted before each uppercase letter and the result is
/// lowercased; a leading `ms-` becomes `-ms-`.
///
/// ```
/// use horizon_lattice_styled::inject::hyphenate_style_name;
///
/// assert_eq!(hyphenate_style_name("backgroundColor"), "background-color");
/// assert_eq!(hyphenate_style_name("WebkitTransform"), "-webkit-transform");
/// assert_eq!(hyphenate_style_name("msTransform"), "-ms-transform");
/// ```
pub fn hyphenate_style_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Memoized [`hyphenate_style_name`].
#[derive(Debug, Default)]
pub struct HyphenationCache {
    names: RwLock<HashMap<String, String>>,
}

impl HyphenationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the hyphenated form of a property name, computing it on a miss.
    pub fn hyphenate(&self, name: &str) -> String {
        if let Some(hyphenated) = self.names.read().get(name) {
            return hyphenated.clone();
        }

        let hyphenated = hyphenate_style_name(name);
        self.names
            .write()
            .insert(name.to_string(), hyphenated.clone());
        hyphenated
    }

    /// Check if a name has been hyphenated before.
    pub fn contains(&self, name: &str) -> bool {
        self.names.read().contains_key(name)
    }

    /// Get the number of cached names.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    /// Remove all cached names.
    pub fn clear(&self) {
        self.names.write().clear();
    }
}

/// Two-level cache of expanded declaration blocks: property, then value.
#[derive(Debug, Default)]
pub struct PrefixCache {
    blocks: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl PrefixCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached block for a property and value.
    pub fn get(&self, property: &str, value: &str) -> Option<String> {
        self.blocks
            .read()
            .get(property)
            .and_then(|values| values.get(value))
            .cloned()
    }

    /// Cache the block for a property and value.
    pub fn insert(&self, property: &str, value: impl Into<String>, block: impl Into<String>) {
        self.blocks
            .write()
            .entry(property.to_string())
            .or_default()
            .insert(value.into(), block.into());
    }

    /// Check if a property and value are cached.
    pub fn contains(&self, property: &str, value: &str) -> bool {
        self.blocks
            .read()
            .get(property)
            .is_some_and(|values| values.contains_key(value))
    }

    /// Get the number of cached blocks across all properties.
    pub fn len(&self) -> usize {
        self.blocks.read().values().map(HashMap::len).sum()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all cached blocks.
    pub fn clear(&self) {
        self.blocks.write().clear();
    }
}
