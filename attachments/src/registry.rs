//! Named attachment instances in registration order.

use attachments_fields::{instance_key, FieldFactory};
use indexmap::IndexMap;
use tracing::debug;

use crate::instance::{Instance, InstanceParams};

/// All registered instances, keyed by normalized name.
///
/// Registering a name again replaces the stored instance wholesale; it keeps
/// the position the name was first registered at.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: IndexMap<String, Instance>,
}

impl InstanceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the instance `name`, applying defaults with
    /// `factory`.
    ///
    /// `name` is normalized with [`instance_key`], so `"Featured-Images"` is
    /// stored as `featured_images`.
    pub fn register(
        &mut self,
        name: &str,
        params: InstanceParams,
        factory: &FieldFactory<'_>,
    ) -> &Instance {
        let key = instance_key(name);
        let instance = params.into_instance(key.clone(), factory);
        debug!(
            instance = %key,
            fields = instance.fields().len(),
            categories = instance.categories().len(),
            replaced = self.instances.contains_key(&key),
            "registered instance"
        );
        let (index, _) = self.instances.insert_full(key, instance);
        &self.instances[index]
    }

    /// Look up an instance by name; the name is normalized first.
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.instances.get(&instance_key(name))
    }

    /// Whether an instance is registered under the normalized `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Instances in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Instance names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instance is registered.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attachments_fields::{FieldParams, FieldTypeRegistry, IdentityTranslator};

    #[test]
    fn register_normalizes_name() {
        let types = FieldTypeRegistry::new();
        let factory = FieldFactory::new(&types, &IdentityTranslator);
        let mut registry = InstanceRegistry::new();

        let instance = registry.register("Featured-Images", InstanceParams::new(), &factory);
        assert_eq!(instance.name(), "featured_images");
        assert!(registry.contains("featured images"));
        assert!(registry.get("featured_images").is_some());
    }

    #[test]
    fn second_registration_replaces_first_entirely() {
        let types = FieldTypeRegistry::new();
        let factory = FieldFactory::new(&types, &IdentityTranslator);
        let mut registry = InstanceRegistry::new();

        registry.register(
            "gallery",
            InstanceParams::new()
                .label("Gallery")
                .limit(5)
                .fields([factory.create(FieldParams::new().name("credit"))]),
            &factory,
        );
        registry.register("gallery", InstanceParams::new(), &factory);

        assert_eq!(registry.len(), 1);
        let gallery = registry.get("gallery").unwrap();
        assert_eq!(gallery.label(), "Attachments");
        assert!(gallery.is_unlimited());
        let names: Vec<_> = gallery.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["title", "caption"]);
    }

    #[test]
    fn replacement_keeps_registration_position() {
        let types = FieldTypeRegistry::new();
        let factory = FieldFactory::new(&types, &IdentityTranslator);
        let mut registry = InstanceRegistry::new();

        registry.register("first", InstanceParams::new(), &factory);
        registry.register("second", InstanceParams::new(), &factory);
        registry.register("first", InstanceParams::new().label("Again"), &factory);

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(registry.get("first").unwrap().label(), "Again");
    }

    #[test]
    fn empty_registry() {
        let registry = InstanceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
        assert!(registry.get("attachments").is_none());
    }
}
