//! Class-name injection engine.

use std::fmt;

use crate::inject::cache::{HyphenationCache, PrefixCache};
use crate::inject::{Declaration, StyleInjector};
use crate::prefix::{Prefixer, StaticPrefixer};
use crate::types::{StyleMap, StyleValue, ADD_CLASS_KEY};

const MEDIA_PREFIX: &str = "@media";

/// Options controlling how the engine builds declaration blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Expand vendor prefixes through the engine's [`Prefixer`].
    ///
    /// When disabled, property names are hyphenated directly and the
    /// prefix cache is bypassed.
    pub vendor_prefixes: bool,
    /// Also cache blocks built from array values, keyed by their entries.
    pub cache_array_values: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            vendor_prefixes: true,
            cache_array_values: false,
        }
    }
}

impl EngineOptions {
    /// Options for the direct-hyphenation variant, without vendor prefixes.
    pub fn plain() -> Self {
        Self {
            vendor_prefixes: false,
            ..Default::default()
        }
    }
}

/// Where a key of a style map routes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind<'a> {
    /// `@media <query>`; holds the query.
    Media(&'a str),
    /// `:pseudo`; holds the whole key.
    Pseudo(&'a str),
    /// The reserved literal class key.
    AddClass,
    /// A CSS property.
    Property,
}

fn classify(key: &str) -> KeyKind<'_> {
    if key.starts_with(MEDIA_PREFIX) {
        KeyKind::Media(key.get(MEDIA_PREFIX.len() + 1..).unwrap_or(""))
    } else if key.starts_with(':') {
        KeyKind::Pseudo(key)
    } else if key == ADD_CLASS_KEY {
        KeyKind::AddClass
    } else {
        KeyKind::Property
    }
}

fn push_class(classes: &mut String, class: &str) {
    if class.is_empty() {
        return;
    }
    if !classes.is_empty() {
        classes.push(' ');
    }
    classes.push_str(class);
}

/// Converts style maps into class-name strings.
///
/// The engine walks a style map, expands vendor prefixes, flattens array
/// values, and threads `:pseudo` and `@media` scopes into nested maps. Every
/// resulting declaration block is handed to a [`StyleInjector`], and the
/// class names it returns are joined with spaces.
///
/// Each engine owns its prefix and hyphenation caches; share an engine
/// behind an `Arc` to share its caches.
///
/// # Example
///
/// ```
/// use horizon_lattice_styled::prelude::*;
///
/// let registry = StyleRegistry::new();
/// let engine = InjectionEngine::new();
///
/// let style = StyleMap::new()
///     .with("userSelect", "none")
///     .with("@media (min-width: 800px)", StyleMap::new().with("fontSize", 18));
///
/// assert_eq!(engine.inject(&registry, &style), "a b");
///
/// let declarations = registry.declarations();
/// assert_eq!(
///     declarations[0].block,
///     "-webkit-user-select:none;-moz-user-select:none;-ms-user-select:none;user-select:none"
/// );
/// assert_eq!(declarations[1].media.as_deref(), Some("(min-width: 800px)"));
/// ```
pub struct InjectionEngine {
    prefixer: Box<dyn Prefixer>,
    options: EngineOptions,
    prefix_cache: PrefixCache,
    hyphenation_cache: HyphenationCache,
}

impl InjectionEngine {
    /// Create an engine using the [`StaticPrefixer`].
    pub fn new() -> Self {
        Self::with_prefixer(StaticPrefixer)
    }

    /// Create an engine that hyphenates directly, without vendor prefixes.
    pub fn plain() -> Self {
        Self::with_options(StaticPrefixer, EngineOptions::plain())
    }

    /// Create an engine with a custom prefixer.
    pub fn with_prefixer(prefixer: impl Prefixer + 'static) -> Self {
        Self::with_options(prefixer, EngineOptions::default())
    }

    /// Create an engine with a custom prefixer and options.
    pub fn with_options(prefixer: impl Prefixer + 'static, options: EngineOptions) -> Self {
        Self {
            prefixer: Box::new(prefixer),
            options,
            prefix_cache: PrefixCache::new(),
            hyphenation_cache: HyphenationCache::new(),
        }
    }

    /// Get the engine options.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Get the prefix cache.
    pub fn prefix_cache(&self) -> &PrefixCache {
        &self.prefix_cache
    }

    /// Get the hyphenation cache.
    pub fn hyphenation_cache(&self) -> &HyphenationCache {
        &self.hyphenation_cache
    }

    /// Clear both caches.
    pub fn clear_caches(&self) {
        self.prefix_cache.clear();
        self.hyphenation_cache.clear();
    }

    /// Inject a style map and return the space-separated class names.
    pub fn inject<I>(&self, injector: &I, styles: &StyleMap) -> String
    where
        I: StyleInjector + ?Sized,
    {
        let _span = tracing::trace_span!("inject", entries = styles.len()).entered();
        self.inject_scoped(injector, styles, None, None, &self.prefix_cache)
    }

    /// Inject a style map under the given media and pseudo scopes.
    ///
    /// Nested `@media` keys replace `media` and nested `:pseudo` keys replace
    /// `pseudo` for their subtree; the other scope is carried through.
    /// Blocks for primitive values are cached in `cache`.
    pub fn inject_scoped<I>(
        &self,
        injector: &I,
        styles: &StyleMap,
        media: Option<&str>,
        pseudo: Option<&str>,
        cache: &PrefixCache,
    ) -> String
    where
        I: StyleInjector + ?Sized,
    {
        let mut classes = String::new();

        for (key, value) in styles.iter() {
            let kind = classify(key);

            let block = match (kind, value) {
                (KeyKind::AddClass, _) => continue,
                (KeyKind::Media(query), StyleValue::Map(nested)) => {
                    let nested = self.inject_scoped(injector, nested, Some(query), pseudo, cache);
                    push_class(&mut classes, &nested);
                    continue;
                }
                (KeyKind::Pseudo(selector), StyleValue::Map(nested)) => {
                    let nested = self.inject_scoped(injector, nested, media, Some(selector), cache);
                    push_class(&mut classes, &nested);
                    continue;
                }
                (_, StyleValue::String(_) | StyleValue::Number(_)) => {
                    self.primitive_block(key, value, cache)
                }
                (_, StyleValue::Array(values)) => self.array_block(key, values, cache),
                (_, other) => {
                    tracing::debug!("Skipping '{}': unsupported {} value", key, other.kind());
                    continue;
                }
            };

            if block.is_empty() {
                continue;
            }

            let class = injector.inject_declaration(&Declaration {
                block: &block,
                media,
                pseudo,
            });
            push_class(&mut classes, &class);
        }

        classes
    }

    fn primitive_block(&self, property: &str, value: &StyleValue, cache: &PrefixCache) -> String {
        let text = value.primitive_text().unwrap_or_default();

        if !self.options.vendor_prefixes {
            return format!("{}:{}", self.hyphenation_cache.hyphenate(property), text);
        }

        if let Some(block) = cache.get(property, &text) {
            tracing::trace!("Prefix cache hit for {}:{}", property, text);
            return block;
        }

        tracing::trace!("Prefix cache miss for {}:{}", property, text);
        let mut pairs = Vec::new();
        self.expand_into(property, value, &mut pairs);
        let block = pairs.join(";");
        cache.insert(property, text, block.clone());
        block
    }

    fn array_block(&self, property: &str, values: &[StyleValue], cache: &PrefixCache) -> String {
        if values.is_empty() {
            return String::new();
        }

        if !self.options.vendor_prefixes {
            let hyphenated = self.hyphenation_cache.hyphenate(property);
            return values
                .iter()
                .filter_map(StyleValue::primitive_text)
                .map(|text| format!("{hyphenated}:{text}"))
                .collect::<Vec<_>>()
                .join(";");
        }

        let cache_key = self.options.cache_array_values.then(|| array_cache_key(values));
        if let Some(key) = &cache_key {
            if let Some(block) = cache.get(property, key) {
                tracing::trace!("Prefix cache hit for {} array", property);
                return block;
            }
        }

        let mut pairs = Vec::new();
        for value in values {
            if value.is_primitive() {
                self.expand_into(property, value, &mut pairs);
            } else {
                tracing::debug!("Skipping {} entry in '{}' array", value.kind(), property);
            }
        }
        let block = pairs.join(";");

        if let Some(key) = cache_key {
            cache.insert(property, key, block.clone());
        }
        block
    }

    /// Append the prefixed `property:value` pairs for one declaration.
    fn expand_into(&self, property: &str, value: &StyleValue, pairs: &mut Vec<String>) {
        for (prefixed, prefixed_value) in self.prefixer.expand(property, value) {
            let hyphenated = self.hyphenation_cache.hyphenate(&prefixed);
            match &prefixed_value {
                StyleValue::Array(entries) => {
                    for entry in entries.iter().filter_map(StyleValue::primitive_text) {
                        pairs.push(format!("{hyphenated}:{entry}"));
                    }
                }
                other => {
                    if let Some(text) = other.primitive_text() {
                        pairs.push(format!("{hyphenated}:{text}"));
                    }
                }
            }
        }
    }
}

/// Cache key for an array value; NUL cannot occur in CSS values.
fn array_cache_key(values: &[StyleValue]) -> String {
    let mut key = String::from("\0[");
    for text in values.iter().filter_map(StyleValue::primitive_text) {
        key.push('\0');
        key.push_str(&text);
    }
    key
}

impl Default for InjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InjectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionEngine")
            .field("options", &self.options)
            .field("prefix_cache", &self.prefix_cache)
            .field("hyphenation_cache", &self.hyphenation_cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::StyleRegistry;
    use crate::prefix::NoPrefixer;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records every declaration and names classes by call index.
    #[derive(Default)]
    struct RecordingInjector {
        calls: Mutex<Vec<(String, Option<String>, Option<String>)>>,
    }

    impl StyleInjector for RecordingInjector {
        fn inject_declaration(&self, declaration: &Declaration<'_>) -> String {
            let mut calls = self.calls.lock();
            calls.push((
                declaration.block.to_string(),
                declaration.media.map(str::to_string),
                declaration.pseudo.map(str::to_string),
            ));
            format!("c{}", calls.len() - 1)
        }
    }

    impl RecordingInjector {
        fn blocks(&self) -> Vec<String> {
            self.calls.lock().iter().map(|(block, _, _)| block.clone()).collect()
        }
    }

    fn counting_prefixer() -> (Arc<AtomicUsize>, impl Prefixer + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let prefixer = move |property: &str, value: &StyleValue| {
            seen.fetch_add(1, Ordering::SeqCst);
            NoPrefixer.expand(property, value)
        };
        (count, prefixer)
    }

    #[test]
    fn classify_keys() {
        assert_eq!(classify("@media (min-width: 100px)"), KeyKind::Media("(min-width: 100px)"));
        assert_eq!(classify("@media"), KeyKind::Media(""));
        assert_eq!(classify(":hover"), KeyKind::Pseudo(":hover"));
        assert_eq!(classify("addClass"), KeyKind::AddClass);
        assert_eq!(classify("color"), KeyKind::Property);
    }

    #[test]
    fn single_property() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        let classes = engine.inject(&injector, &StyleMap::new().with("color", "red"));

        assert_eq!(classes, "c0");
        assert_eq!(
            *injector.calls.lock(),
            vec![("color:red".to_string(), None, None)]
        );
    }

    #[test]
    fn nested_scopes_are_threaded() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        let style = StyleMap::new().with(
            "@media (min-width: 100px)",
            StyleMap::new()
                .with("color", "green")
                .with(":hover", StyleMap::new().with("color", "blue")),
        );

        assert_eq!(engine.inject(&injector, &style), "c0 c1");
        assert_eq!(
            *injector.calls.lock(),
            vec![
                ("color:green".to_string(), Some("(min-width: 100px)".to_string()), None),
                (
                    "color:blue".to_string(),
                    Some("(min-width: 100px)".to_string()),
                    Some(":hover".to_string())
                ),
            ]
        );
    }

    #[test]
    fn inner_scope_replaces_outer_of_same_kind() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        let style = StyleMap::new().with(
            ":hover",
            StyleMap::new().with(":focus", StyleMap::new().with("color", "red")),
        );
        engine.inject(&injector, &style);

        assert_eq!(injector.calls.lock()[0].2.as_deref(), Some(":focus"));
    }

    #[test]
    fn primitive_blocks_are_cached() {
        let (count, prefixer) = counting_prefixer();
        let engine = InjectionEngine::with_prefixer(prefixer);
        let registry = StyleRegistry::new();
        let style = StyleMap::new().with("color", "red");

        assert_eq!(engine.inject(&registry, &style), "a");
        assert_eq!(engine.inject(&registry, &style), "a");

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(engine.prefix_cache().contains("color", "red"));
    }

    #[test]
    fn numbers_and_strings_share_cache_entries() {
        let (count, prefixer) = counting_prefixer();
        let engine = InjectionEngine::with_prefixer(prefixer);
        let registry = StyleRegistry::new();

        engine.inject(&registry, &StyleMap::new().with("opacity", 1));
        engine.inject(&registry, &StyleMap::new().with("opacity", "1"));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(registry.declarations()[0].block, "opacity:1");
    }

    #[test]
    fn arrays_form_one_block_and_skip_cache() {
        let (count, prefixer) = counting_prefixer();
        let engine = InjectionEngine::with_prefixer(prefixer);
        let injector = RecordingInjector::default();
        let style = StyleMap::new().with("transform", vec!["scale(1)", "scale(1.1)"]);

        engine.inject(&injector, &style);
        engine.inject(&injector, &style);

        assert_eq!(
            injector.blocks(),
            ["transform:scale(1);transform:scale(1.1)"; 2]
        );
        assert_eq!(count.load(Ordering::SeqCst), 4);
        assert!(engine.prefix_cache().is_empty());
    }

    #[test]
    fn arrays_cached_when_enabled() {
        let (count, prefixer) = counting_prefixer();
        let options = EngineOptions {
            cache_array_values: true,
            ..Default::default()
        };
        let engine = InjectionEngine::with_options(prefixer, options);
        let injector = RecordingInjector::default();
        let style = StyleMap::new().with("transform", vec!["scale(1)", "scale(1.1)"]);

        engine.inject(&injector, &style);
        engine.inject(&injector, &style);

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(injector.blocks()[1], "transform:scale(1);transform:scale(1.1)");
        // The array key never collides with a plain string value.
        assert!(!engine.prefix_cache().contains("transform", "scale(1)"));
    }

    #[test]
    fn empty_array_is_not_submitted() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        let style = StyleMap::new()
            .with("transform", Vec::<StyleValue>::new())
            .with("color", "red");

        assert_eq!(engine.inject(&injector, &style), "c0");
        assert_eq!(injector.blocks(), ["color:red"]);
    }

    #[test]
    fn prefixed_expansion_is_hyphenated() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        engine.inject(&injector, &StyleMap::new().with("transform", "rotate(45deg)"));
        engine.inject(&injector, &StyleMap::new().with("display", "flex"));

        assert_eq!(
            injector.blocks(),
            [
                "-webkit-transform:rotate(45deg);-ms-transform:rotate(45deg);transform:rotate(45deg)",
                "display:-webkit-box;display:-moz-box;display:-ms-flexbox;display:-webkit-flex;display:flex",
            ]
        );
        assert!(engine.hyphenation_cache().contains("WebkitTransform"));
    }

    #[test]
    fn unsupported_shapes_are_skipped() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::new();

        let style = StyleMap::new()
            .with("visible", true)
            .with("color", StyleValue::Null)
            .with("margin", StyleMap::new().with("top", 1))
            .with("addClass", "active")
            .with("opacity", 0.5);

        assert_eq!(engine.inject(&injector, &style), "c0");
        assert_eq!(injector.blocks(), ["opacity:0.5"]);
    }

    #[test]
    fn plain_variant_hyphenates_directly() {
        let injector = RecordingInjector::default();
        let engine = InjectionEngine::plain();

        let style = StyleMap::new()
            .with("userSelect", "none")
            .with("fontFamily", vec!["Helvetica", "sans-serif"]);

        assert_eq!(engine.inject(&injector, &style), "c0 c1");
        assert_eq!(
            injector.blocks(),
            ["user-select:none", "font-family:Helvetica;font-family:sans-serif"]
        );
        assert!(engine.prefix_cache().is_empty());
    }

    #[test]
    fn empty_expansion_is_not_submitted() {
        let engine = InjectionEngine::with_prefixer(|_: &str, _: &StyleValue| {
            Vec::<(String, StyleValue)>::new()
        });
        let injector = RecordingInjector::default();

        assert_eq!(engine.inject(&injector, &StyleMap::new().with("color", "red")), "");
        assert!(injector.blocks().is_empty());
    }

    #[test]
    fn engines_do_not_share_caches() {
        let first = InjectionEngine::new();
        let second = InjectionEngine::new();
        let registry = StyleRegistry::new();

        first.inject(&registry, &StyleMap::new().with("color", "red"));

        assert_eq!(first.prefix_cache().len(), 1);
        assert!(second.prefix_cache().is_empty());

        first.clear_caches();
        assert!(first.prefix_cache().is_empty());
        assert!(first.hyphenation_cache().is_empty());
    }
}
