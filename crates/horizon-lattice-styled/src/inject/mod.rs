//! Declaration injection.
//!
//! The [`InjectionEngine`] flattens a resolved style map into declarations
//! and registers each with a [`StyleInjector`], collecting the returned
//! class names.

mod cache;
mod declaration;
mod engine;
mod registry;

pub use cache::{hyphenate_style_name, HyphenationCache, PrefixCache};
pub use declaration::{Declaration, StyleInjector};
pub use engine::{EngineOptions, InjectionEngine};
pub use registry::{RegisteredDeclaration, StyleRegistry};
