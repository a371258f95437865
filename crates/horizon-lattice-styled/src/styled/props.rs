//! Element properties passed through styled components.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::types::{StyleMap, StyleValue, ADD_CLASS_KEY};

/// Prop key for the caller-supplied class name.
pub const CLASS_NAME_KEY: &str = "className";
/// Alternative prop key for the caller-supplied class name.
pub const CLASS_KEY: &str = "class";

/// Hook receiving the underlying element once it is mounted.
pub type RefHook = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Properties of an element: ordered attributes plus optional ref hooks.
///
/// `inner_ref` is what callers hand to a styled component; the component
/// moves it into `node_ref`, the hook the host attaches to the element.
#[derive(Clone, Default)]
pub struct Props {
    attributes: StyleMap,
    inner_ref: Option<RefHook>,
    node_ref: Option<RefHook>,
}

impl Props {
    /// Create empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.attributes.insert(key, value);
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.attributes.get(key)
    }

    /// Get a non-empty string attribute.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(StyleValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Check if an attribute is present and truthy.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(StyleValue::is_truthy)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.attributes.remove(key)
    }

    /// Get all attributes in insertion order.
    pub fn attributes(&self) -> &StyleMap {
        &self.attributes
    }

    /// The caller-supplied `className`, if non-empty.
    pub fn class_name(&self) -> Option<&str> {
        self.str(CLASS_NAME_KEY)
    }

    /// The caller-supplied `class`, if non-empty.
    pub fn class(&self) -> Option<&str> {
        self.str(CLASS_KEY)
    }

    /// The caller-supplied `addClass`, if non-empty.
    pub fn add_class(&self) -> Option<&str> {
        self.str(ADD_CLASS_KEY)
    }

    /// Builder-style setter for the inner ref hook.
    pub fn with_inner_ref<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Any) + Send + Sync + 'static,
    {
        self.inner_ref = Some(Arc::new(hook));
        self
    }

    /// Get the inner ref hook.
    pub fn inner_ref(&self) -> Option<&RefHook> {
        self.inner_ref.as_ref()
    }

    /// Get the hook the host should attach to the element.
    pub fn node_ref(&self) -> Option<&RefHook> {
        self.node_ref.as_ref()
    }

    /// Move the inner ref hook into the node ref slot.
    pub(crate) fn forward_inner_ref(&mut self) {
        if let Some(hook) = self.inner_ref.take() {
            self.node_ref = Some(hook);
        }
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("attributes", &self.attributes)
            .field("inner_ref", &self.inner_ref.is_some())
            .field("node_ref", &self.node_ref.is_some())
            .finish()
    }
}
