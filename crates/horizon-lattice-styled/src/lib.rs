//! Styled components and atomic class-name injection for Horizon Lattice.
//!
//! This crate turns declarative style maps into deduplicated atomic class
//! names, featuring:
//!
//! - **Style descriptors**: Static maps or functions of the current props and context
//! - **Resolution**: Ordered, last-write-wins merging of descriptor lists
//! - **Injection**: Recursive walking of pseudo-selector and media-query scopes
//! - **Vendor prefixes**: Cached prefix expansion for every declaration
//! - **Styled wrappers**: Attach generated class names to host elements
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lattice_styled::prelude::*;
//!
//! let registry = Arc::new(StyleRegistry::new());
//! let engine = InjectionEngine::new();
//!
//! let style = StyleMap::new()
//!     .with("color", "red")
//!     .with(":hover", StyleMap::new().with("color", "blue"));
//!
//! let classes = engine.inject(registry.as_ref(), &style);
//! assert_eq!(classes, "a b");
//! assert_eq!(registry.len(), 2);
//! ```

pub mod types;
pub mod resolve;
pub mod prefix;
pub mod inject;
pub mod styled;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::types::{StyleValue, StyleMap, ADD_CLASS_KEY};
    pub use crate::resolve::{StyleDescriptor, StyleList, resolve_styles};
    pub use crate::prefix::{Prefixer, NoPrefixer, StaticPrefixer};
    pub use crate::inject::{
        Declaration, StyleInjector, StyleRegistry,
        InjectionEngine, EngineOptions,
        PrefixCache, HyphenationCache, hyphenate_style_name,
    };
    pub use crate::styled::{
        styled, Component, ElementFactory, ElementTarget, Props, RefHook,
        RenderContext, Renderable, StyleProvider, StyledComponent,
    };
    pub use crate::{Error, Result};
}
