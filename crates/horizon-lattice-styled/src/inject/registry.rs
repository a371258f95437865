//! In-memory style injector.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{Declaration, StyleInjector};

/// A declaration recorded by a [`StyleRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredDeclaration {
    /// Class name assigned to the declaration.
    pub class_name: String,
    /// The declaration block.
    pub block: String,
    /// Media query condition, if any.
    pub media: Option<String>,
    /// Pseudo-selector, if any.
    pub pseudo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DeclarationKey {
    block: String,
    media: Option<String>,
    pseudo: Option<String>,
}

impl From<&Declaration<'_>> for DeclarationKey {
    fn from(declaration: &Declaration<'_>) -> Self {
        Self {
            block: declaration.block.to_string(),
            media: declaration.media.map(str::to_string),
            pseudo: declaration.pseudo.map(str::to_string),
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    classes: HashMap<DeclarationKey, usize>,
    declarations: Vec<RegisteredDeclaration>,
}

/// An in-memory [`StyleInjector`] that deduplicates declarations.
///
/// Each distinct `(block, media, pseudo)` triple gets its own class name,
/// allocated from an alphabetic counter: `a`, `b`, ..., `z`, `aa`, `ab`, ...
/// Identical declarations always map to the same class.
///
/// The registry only collects declarations. Turning them into a stylesheet
/// is left to the host.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    prefix: String,
    state: Mutex<RegistryState>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose class names start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: Mutex::default(),
        }
    }

    /// Get the class name assigned to a declaration, if registered.
    pub fn class_for(&self, declaration: &Declaration<'_>) -> Option<String> {
        let state = self.state.lock();
        state
            .classes
            .get(&DeclarationKey::from(declaration))
            .map(|&index| state.declarations[index].class_name.clone())
    }

    /// Get a snapshot of all declarations in registration order.
    pub fn declarations(&self) -> Vec<RegisteredDeclaration> {
        self.state.lock().declarations.clone()
    }

    /// Get the number of distinct declarations.
    pub fn len(&self) -> usize {
        self.state.lock().declarations.len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().declarations.is_empty()
    }
}

impl StyleInjector for StyleRegistry {
    fn inject_declaration(&self, declaration: &Declaration<'_>) -> String {
        let key = DeclarationKey::from(declaration);
        let mut state = self.state.lock();

        if let Some(&index) = state.classes.get(&key) {
            return state.declarations[index].class_name.clone();
        }

        let index = state.declarations.len();
        let class_name = format!("{}{}", self.prefix, alphabetic_name(index));
        tracing::trace!(
            class = %class_name,
            block = declaration.block,
            "Registered declaration"
        );

        state.declarations.push(RegisteredDeclaration {
            class_name: class_name.clone(),
            block: key.block.clone(),
            media: key.media.clone(),
            pseudo: key.pseudo.clone(),
        });
        state.classes.insert(key, index);
        class_name
    }
}

/// Bijective base-26 name: 0 => "a", 25 => "z", 26 => "aa".
fn alphabetic_name(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'a' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
