//! Localization hook applied to user-facing text.

use std::collections::HashMap;

/// Translates a user-facing string into the host's current locale.
///
/// Implementations must return the input unchanged when they have no
/// translation for it.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Passes every string through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Looks strings up in a fixed message catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Catalog over `messages`, keyed by source text.
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Add or replace a single translation.
    pub fn with(mut self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.messages.insert(source.into(), translated.into());
        self
    }

    /// Number of translations in the catalog.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the catalog holds no translations.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str) -> String {
        self.messages
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
