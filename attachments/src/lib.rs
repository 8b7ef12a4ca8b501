//! Reusable attachment records for content items
//!
//! An *instance* is a named group of fields with display metadata, bound to
//! the content categories it applies to. Fields come from the open field type
//! registry in [`attachments_fields`]; configuration comes from
//! [`attachments_config`].
//!
//! Bootstrap happens once, through [`AttachmentsBuilder`]:
//!
//! 1. field types are registered (built-in `text`, contributors, configured
//!    definitions)
//! 2. instances are registered (the stock `attachments` instance unless
//!    disabled, then configured and programmatic ones)
//! 3. the instances applicable to the current category are resolved
//!
//! After that the [`Attachments`] context is read-only and hands
//! [`InstanceView`]s to whatever renders the edit form.
//!
//! ```
//! use attachments::Attachments;
//!
//! let attachments = Attachments::builder().build();
//! assert_eq!(attachments.instances_for_category(Some("page")), vec!["attachments"]);
//! assert!(attachments.instances_for_category(Some("custom_cpt")).is_empty());
//! ```

pub mod category;
pub mod context;
pub mod error;
pub mod instance;
pub mod registry;
pub mod resolver;
pub mod view;

pub use category::{CategoryDetector, RequestCategoryDetector, DEFAULT_CATEGORY};
pub use context::{Attachments, AttachmentsBuilder, DEFAULT_INSTANCE};
pub use error::{AttachmentsError, Result};
pub use instance::{Instance, InstanceParams, UNLIMITED};
pub use registry::InstanceRegistry;
pub use resolver::InstanceResolver;
pub use view::{FieldView, InstanceView, JsonRenderer, MetaBox, Renderer};

pub use attachments_config::{AttachmentsConfig, ConfigProvider, InstanceConfig};
pub use attachments_fields::{
    Field, FieldFactory, FieldKind, FieldParams, FieldTypeContributor, FieldTypeRegistry,
    FieldTypeSource, Translator, TypeResolver,
};
