//! Render context and the style provider.

use std::fmt;
use std::sync::Arc;

use crate::inject::{InjectionEngine, StyleInjector};
use crate::types::{StyleMap, StyleValue};

/// Ambient values visible to every styled component during rendering.
///
/// Holds the style injector installed by the nearest [`StyleProvider`], the
/// engine used to inject styles, and free-form values that dynamic style
/// descriptors may read (theme tokens, locale, and so on).
#[derive(Clone)]
pub struct RenderContext {
    injector: Option<Arc<dyn StyleInjector>>,
    engine: Arc<InjectionEngine>,
    values: StyleMap,
}

impl RenderContext {
    /// Create a context with no injector and a fresh engine.
    pub fn new() -> Self {
        Self {
            injector: None,
            engine: Arc::new(InjectionEngine::new()),
            values: StyleMap::new(),
        }
    }

    /// Builder-style injector setter.
    pub fn with_injector(mut self, injector: Arc<dyn StyleInjector>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// Builder-style engine setter.
    pub fn with_engine(mut self, engine: Arc<InjectionEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Builder-style value setter.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Get the style injector, if one was provided.
    pub fn injector(&self) -> Option<&Arc<dyn StyleInjector>> {
        self.injector.as_ref()
    }

    /// Get the injection engine.
    pub fn engine(&self) -> &Arc<InjectionEngine> {
        &self.engine
    }

    /// Get a context value.
    pub fn value(&self, key: &str) -> Option<&StyleValue> {
        self.values.get(key)
    }

    /// Get all context values.
    pub fn values(&self) -> &StyleMap {
        &self.values
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("injector", &self.injector.is_some())
            .field("engine", &self.engine)
            .field("values", &self.values)
            .finish()
    }
}

/// Makes a style injector available to all descendants.
///
/// The provider owns one [`InjectionEngine`], so every context it builds
/// shares the same prefix and hyphenation caches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_lattice_styled::prelude::*;
///
/// let registry = Arc::new(StyleRegistry::new());
/// let provider = StyleProvider::new(registry.clone());
///
/// let ctx = provider.child_context(&RenderContext::new().with_value("theme", "dark"));
/// assert!(ctx.injector().is_some());
/// assert_eq!(ctx.value("theme"), Some(&StyleValue::from("dark")));
/// ```
#[derive(Clone)]
pub struct StyleProvider {
    injector: Arc<dyn StyleInjector>,
    engine: Arc<InjectionEngine>,
}

impl StyleProvider {
    /// Create a provider for an injector with its own default engine.
    pub fn new(injector: Arc<dyn StyleInjector>) -> Self {
        Self {
            injector,
            engine: Arc::new(InjectionEngine::new()),
        }
    }

    /// Use a shared injection engine instead of the provider's own.
    pub fn with_engine(mut self, engine: Arc<InjectionEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Get the provided injector.
    pub fn injector(&self) -> &Arc<dyn StyleInjector> {
        &self.injector
    }

    /// Get the provided engine.
    pub fn engine(&self) -> &Arc<InjectionEngine> {
        &self.engine
    }

    /// Build the context seen by descendants of this provider.
    ///
    /// Parent values are kept; the injector and engine are this provider's.
    pub fn child_context(&self, parent: &RenderContext) -> RenderContext {
        parent
            .clone()
            .with_injector(Arc::clone(&self.injector))
            .with_engine(Arc::clone(&self.engine))
    }

    /// Build a descendant context from scratch.
    pub fn context(&self) -> RenderContext {
        self.child_context(&RenderContext::new())
    }

    /// Render children unchanged.
    pub fn render<T>(&self, children: T) -> T {
        children
    }
}

impl fmt::Debug for StyleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProvider")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
