//! Declarations and the injection collaborator.

use std::sync::Arc;

/// One flattened CSS block plus its scope, handed to a [`StyleInjector`].
///
/// The block holds one or more `property:value` pairs joined by `;`, e.g.
/// `-webkit-transform:scale(1);transform:scale(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Declaration<'a> {
    /// The declaration block, without braces or a trailing `;`.
    pub block: &'a str,
    /// Media query condition, without the `@media ` prefix.
    pub media: Option<&'a str>,
    /// Pseudo-selector, including the leading `:`.
    pub pseudo: Option<&'a str>,
}

impl<'a> Declaration<'a> {
    /// Create an unscoped declaration.
    pub fn new(block: &'a str) -> Self {
        Self {
            block,
            media: None,
            pseudo: None,
        }
    }

    /// Set the media scope.
    pub fn media(mut self, media: &'a str) -> Self {
        self.media = Some(media);
        self
    }

    /// Set the pseudo scope.
    pub fn pseudo(mut self, pseudo: &'a str) -> Self {
        self.pseudo = Some(pseudo);
        self
    }
}

/// Registers declarations and returns the class name for each.
///
/// Injecting the same declaration twice must be safe and should return the
/// same class name both times.
pub trait StyleInjector: Send + Sync {
    /// Register a declaration and return its class name.
    fn inject_declaration(&self, declaration: &Declaration<'_>) -> String;
}

impl<T: StyleInjector + ?Sized> StyleInjector for Arc<T> {
    fn inject_declaration(&self, declaration: &Declaration<'_>) -> String {
        (**self).inject_declaration(declaration)
    }
}

impl<T: StyleInjector + ?Sized> StyleInjector for &T {
    fn inject_declaration(&self, declaration: &Declaration<'_>) -> String {
        (**self).inject_declaration(declaration)
    }
}
