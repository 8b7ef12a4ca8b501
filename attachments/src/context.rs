//! The [`Attachments`] context and its bootstrap.

use std::collections::HashMap;
use std::fmt;

use attachments_config::{AttachmentsConfig, ConfigProvider, InstanceConfig};
use attachments_fields::{
    CatalogTranslator, Field, FieldFactory, FieldParams, FieldTypeContributor, FieldTypeLoader,
    FieldTypeRegistry, FieldTypeRegistryBuilder, FieldTypeSource, IdentityTranslator, Translator,
    TypeResolver,
};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::category::{CategoryDetector, RequestCategoryDetector};
use crate::error::{AttachmentsError, Result};
use crate::instance::{Instance, InstanceParams};
use crate::registry::InstanceRegistry;
use crate::resolver::InstanceResolver;
use crate::view::{InstanceView, MetaBox, Renderer};

/// Name of the stock instance registered during bootstrap.
pub const DEFAULT_INSTANCE: &str = "attachments";

/// Owns both registries plus the host hooks.
///
/// Built once with [`Attachments::builder`]. Registering instances afterwards
/// is allowed; call [`Attachments::set_instances_for_current_category`] to
/// refresh the current selection.
pub struct Attachments {
    field_types: FieldTypeRegistry,
    instances: InstanceRegistry,
    translator: Box<dyn Translator>,
    detector: Box<dyn CategoryDetector>,
    current: Vec<String>,
}

impl Attachments {
    /// A context with the built-in field type and the stock instance.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Builder for a configured or extended context.
    pub fn builder() -> AttachmentsBuilder {
        AttachmentsBuilder::new()
    }

    /// The finalized field type registry.
    pub fn field_types(&self) -> &FieldTypeRegistry {
        &self.field_types
    }

    /// Every registered instance.
    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    /// Instance `name`, normalized before lookup.
    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.instances.get(name)
    }

    /// Factory over this context's registry and translator.
    pub fn field_factory(&self) -> FieldFactory<'_> {
        FieldFactory::new(&self.field_types, self.translator.as_ref())
    }

    /// Shortcut for `field_factory().create(params)`.
    pub fn create_field(&self, params: FieldParams) -> Option<Field> {
        self.field_factory().create(params)
    }

    /// Register (or replace) an instance after bootstrap.
    pub fn register(&mut self, name: &str, params: InstanceParams) -> &Instance {
        let factory = FieldFactory::new(&self.field_types, self.translator.as_ref());
        self.instances.register(name, params, &factory)
    }

    /// Swap the category detector, e.g. per request, and refresh the current
    /// instances.
    pub fn set_detector(&mut self, detector: impl CategoryDetector + 'static) {
        self.detector = Box::new(detector);
        self.set_instances_for_current_category();
    }

    /// Recompute the instances applicable to the detected category.
    pub fn set_instances_for_current_category(&mut self) {
        self.current = self.instance_resolver().instances_for_category(None);
    }

    /// Instance names applicable to the detected category, as of the last
    /// refresh.
    pub fn current_instances(&self) -> &[String] {
        &self.current
    }

    /// Reverse lookup over this context's registry.
    pub fn type_resolver(&self) -> TypeResolver<'_> {
        TypeResolver::new(&self.field_types)
    }

    /// Registry key of `field`'s implementation.
    pub fn type_of(&self, field: &Field) -> Option<&str> {
        self.type_resolver().type_of(field)
    }

    /// Category filter over this context's instances and detector.
    pub fn instance_resolver(&self) -> InstanceResolver<'_> {
        InstanceResolver::new(&self.instances, self.detector.as_ref())
    }

    /// Names of the instances applying to `category`, see
    /// [`InstanceResolver::instances_for_category`].
    pub fn instances_for_category(&self, category: Option<&str>) -> Vec<String> {
        self.instance_resolver().instances_for_category(category)
    }

    /// One meta box per current instance.
    pub fn meta_boxes(&self) -> Vec<MetaBox> {
        let category = self.detector.detect_current_category();
        self.current
            .iter()
            .filter_map(|name| self.instances.get(name))
            .map(|instance| MetaBox::new(instance, &category))
            .collect()
    }

    /// The view of instance `name`, with field values taken from `values`.
    pub fn view(&self, name: &str, values: &HashMap<String, String>) -> Option<InstanceView> {
        let instance = self.instances.get(name)?;
        Some(InstanceView::new(instance, &self.type_resolver(), values))
    }

    /// Views of every current instance, without values.
    pub fn current_views(&self) -> Vec<InstanceView> {
        let values = HashMap::new();
        self.current
            .iter()
            .filter_map(|name| self.view(name, &values))
            .collect()
    }

    /// Render instance `name` with `renderer`.
    pub fn render<R: Renderer>(
        &self,
        name: &str,
        renderer: &R,
        values: &HashMap<String, String>,
    ) -> Result<R::Output> {
        let view = self
            .view(name, values)
            .ok_or_else(|| AttachmentsError::InstanceNotFound {
                name: name.to_string(),
            })?;
        Ok(renderer.render(&view))
    }
}

impl Default for Attachments {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Attachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachments")
            .field("field_types", &self.field_types)
            .field("instances", &self.instances)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Bootstrap for [`Attachments`].
///
/// Field types are finalized before any instance is built, so every
/// instance's fields see the complete registry.
pub struct AttachmentsBuilder {
    config: AttachmentsConfig,
    field_types: FieldTypeRegistryBuilder,
    translator: Option<Box<dyn Translator>>,
    detector: Option<Box<dyn CategoryDetector>>,
    instances: Vec<InstanceConfig>,
}

impl AttachmentsBuilder {
    /// A builder with default configuration and no plugins.
    pub fn new() -> Self {
        Self {
            config: AttachmentsConfig::default(),
            field_types: FieldTypeRegistry::builder(),
            translator: None,
            detector: None,
            instances: Vec::new(),
        }
    }

    /// Use an already loaded configuration.
    pub fn config(mut self, config: AttachmentsConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from `provider`.
    pub fn load_config(self, provider: &ConfigProvider) -> Result<Self> {
        Ok(self.config(provider.load()?))
    }

    /// Add a field type contributor. Configured field types are applied
    /// after every contributor.
    pub fn contributor(mut self, contributor: impl FieldTypeContributor + 'static) -> Self {
        self.field_types = self.field_types.contributor(contributor);
        self
    }

    /// Replace the loader for contributed sources.
    pub fn loader(mut self, loader: impl FieldTypeLoader + 'static) -> Self {
        self.field_types = self.field_types.loader(loader);
        self
    }

    /// Defaults to a catalog built from the configured translations.
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// Defaults to a [`RequestCategoryDetector`] restricted to the
    /// configured known categories.
    pub fn detector(mut self, detector: impl CategoryDetector + 'static) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Register an instance after the configured ones.
    pub fn instance(mut self, instance: InstanceConfig) -> Self {
        self.instances.push(instance);
        self
    }

    /// Run bootstrap and return the finished context.
    pub fn build(self) -> Attachments {
        let AttachmentsBuilder {
            config,
            field_types,
            translator,
            detector,
            instances: extra_instances,
        } = self;

        let translator = translator.unwrap_or_else(|| default_translator(&config));
        let detector = detector.unwrap_or_else(|| {
            Box::new(
                RequestCategoryDetector::new()
                    .with_known_categories(config.known_categories.iter().cloned()),
            )
        });

        let configured = config.field_types.clone();
        let field_types = field_types
            .contributor(move |mut sources: IndexMap<String, FieldTypeSource>| {
                for field_type in &configured {
                    sources.insert(
                        field_type.key.clone(),
                        FieldTypeSource::Path(field_type.path.clone()),
                    );
                }
                sources
            })
            .build();

        let mut instances = InstanceRegistry::new();
        {
            let factory = FieldFactory::new(&field_types, translator.as_ref());
            if config.register_default_instance {
                instances.register(DEFAULT_INSTANCE, InstanceParams::new(), &factory);
            }
            for instance in config.instances.into_iter().chain(extra_instances) {
                let name = instance.name.clone();
                let params = InstanceParams::from_config(instance, &factory);
                instances.register(&name, params, &factory);
            }
        }

        let mut attachments = Attachments {
            field_types,
            instances,
            translator,
            detector,
            current: Vec::new(),
        };
        attachments.set_instances_for_current_category();

        info!(
            field_types = attachments.field_types.len(),
            instances = attachments.instances.len(),
            current = ?attachments.current,
            "attachments bootstrapped"
        );
        attachments
    }
}

impl Default for AttachmentsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_translator(config: &AttachmentsConfig) -> Box<dyn Translator> {
    if config.translations.is_empty() {
        Box::new(IdentityTranslator)
    } else {
        debug!(messages = config.translations.len(), "using configured translations");
        Box::new(CatalogTranslator::new(config.translations.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::JsonRenderer;
    use attachments_config::PostTypes;
    use attachments_fields::{DeclaredField, InputKind};
    use std::sync::Arc;

    #[test]
    fn default_bootstrap() {
        let attachments = Attachments::new();

        assert_eq!(attachments.field_types().keys().collect::<Vec<_>>(), vec!["text"]);
        assert_eq!(attachments.instances().len(), 1);
        let instance = attachments.instance(DEFAULT_INSTANCE).unwrap();
        let names: Vec<_> = instance.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["title", "caption"]);
        assert_eq!(attachments.current_instances(), ["attachments"]);
    }

    #[test]
    fn default_instance_can_be_disabled() {
        let config = AttachmentsConfig {
            register_default_instance: false,
            ..Default::default()
        };
        let attachments = Attachments::builder().config(config).build();
        assert!(attachments.instances().is_empty());
        assert!(attachments.current_instances().is_empty());
        assert!(attachments.meta_boxes().is_empty());
    }

    #[test]
    fn contributor_types_are_available_to_instances() {
        let attachments = Attachments::builder()
            .contributor(|mut sources: IndexMap<String, FieldTypeSource>| {
                let kind: Arc<dyn attachments_fields::FieldKind> =
                    Arc::new(DeclaredField::new("acme::notes", InputKind::Textarea));
                sources.insert("notes".into(), kind.into());
                sources
            })
            .instance(InstanceConfig {
                post_type: Some(PostTypes::One("post".into())),
                fields: Some(vec![FieldParams::new().name("notes").field_type("notes")]),
                ..InstanceConfig::new("downloads")
            })
            .build();

        let downloads = attachments.instance("downloads").unwrap();
        assert_eq!(downloads.fields().len(), 1);
        assert_eq!(attachments.type_of(&downloads.fields()[0]), Some("notes"));
        assert_eq!(
            attachments.instances_for_category(Some("post")),
            vec!["attachments", "downloads"]
        );
    }

    #[test]
    fn builder_instances_come_after_configured_ones() {
        let mut config = AttachmentsConfig::default();
        config.instances.push(InstanceConfig::new("configured"));
        let attachments = Attachments::builder()
            .config(config)
            .instance(InstanceConfig::new("programmatic"))
            .build();

        assert_eq!(
            attachments.instances().names().collect::<Vec<_>>(),
            vec!["attachments", "configured", "programmatic"]
        );
    }

    #[test]
    fn configured_translations_reach_labels() {
        let mut config = AttachmentsConfig::default();
        config
            .translations
            .insert("Caption".into(), "Légende".into());
        let attachments = Attachments::builder().config(config).build();
        let instance = attachments.instance(DEFAULT_INSTANCE).unwrap();
        assert_eq!(instance.field("caption").unwrap().label(), "Légende");
    }

    #[test]
    fn register_after_bootstrap_and_refresh() {
        let mut attachments = Attachments::new();
        attachments.register("gallery", InstanceParams::new().category("page"));
        assert_eq!(attachments.current_instances(), ["attachments"]);

        attachments.set_detector(RequestCategoryDetector::new().with_current("page"));
        assert_eq!(attachments.current_instances(), ["attachments", "gallery"]);

        let boxes = attachments.meta_boxes();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].id, "attachments-gallery");
        assert_eq!(boxes[1].category, "page");
    }

    #[test]
    fn configured_instances_register_in_declaration_order() {
        let mut config = AttachmentsConfig::default();
        for name in ["zeta", "alpha", "mid"] {
            config.instances.push(InstanceConfig {
                post_type: Some(PostTypes::One("post".into())),
                ..InstanceConfig::new(name)
            });
        }
        let attachments = Attachments::builder().config(config).build();

        assert_eq!(
            attachments.instances_for_category(Some("post")),
            vec!["attachments", "zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn render_unknown_instance_is_an_error() {
        let attachments = Attachments::new();
        let err = attachments
            .render("missing", &JsonRenderer::default(), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, AttachmentsError::InstanceNotFound { .. }));
    }

    #[test]
    fn render_current_instance() {
        let attachments = Attachments::new();
        let values = HashMap::from([("title".to_string(), "Cover".to_string())]);
        let json = attachments
            .render(DEFAULT_INSTANCE, &JsonRenderer::default(), &values)
            .unwrap()
            .unwrap();
        assert!(json.contains("\"field_name\":\"attachments[attachments][title]\""));
        assert!(json.contains("\"value\":\"Cover\""));
        assert_eq!(attachments.current_views().len(), 1);
    }
}
