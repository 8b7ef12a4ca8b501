//! Configuration for Attachments
//!
//! Configuration is layered with [figment], later sources overriding earlier
//! ones:
//!
//! 1. built-in defaults ([`AttachmentsConfig::default`])
//! 2. `~/.attachments/attachments.{toml,yaml,yml,json}` (when enabled)
//! 3. `<project>/.attachments/attachments.{toml,yaml,yml,json}`
//! 4. an explicitly supplied file
//! 5. `ATTACHMENTS_*` environment variables, nested keys separated by `__`
//!
//! Relative field type paths resolve against the directory of the file that
//! declares them; for files inside `.attachments/` that is the project root.
//!
//! ```yaml
//! register_default_instance: true
//! field_types:
//!   - key: notes
//!     path: plugins/notes.yaml
//! instances:
//!   - name: gallery
//!     label: Gallery
//!     post_type: product
//!     limit: 12
//!     fields:
//!       - name: caption
//!         type: text
//!         label: Caption
//! translations:
//!   Caption: Légende
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use types::{AttachmentsConfig, FieldTypeConfig, InstanceConfig, PostTypes};
