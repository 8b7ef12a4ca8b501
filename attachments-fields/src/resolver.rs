//! Reverse lookup from a built [`Field`] to its type key.
//!
//! The forward map in [`FieldTypeRegistry`] is the only source of truth. One
//! implementation may sit under several keys and a key may be reassigned after
//! a field was built, so the answer is "first key in registration order whose
//! implementation matches", or nothing.

use crate::field::Field;
use crate::registry::FieldTypeRegistry;

/// Reverse lookup from a field to the key of its implementation.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a FieldTypeRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Resolver over a finalized registry.
    pub fn new(registry: &'a FieldTypeRegistry) -> Self {
        Self { registry }
    }

    /// The registry key `field`'s implementation is registered under.
    pub fn type_of(&self, field: &Field) -> Option<&'a str> {
        let id = field.implementation_id();
        self.registry
            .iter()
            .find(|(_, kind)| kind.id() == id)
            .map(|(key, _)| key)
    }
}
