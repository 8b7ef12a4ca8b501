//! Configuration provider using Figment

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    value::magic::RelativePathBuf,
    Figment,
};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery, CONFIG_DIR};
use crate::error::{ConfigError, ConfigResult};
use crate::types::AttachmentsConfig;

/// Environment variable prefix, e.g. `ATTACHMENTS_REGISTER_DEFAULT_INSTANCE`.
pub const ENV_PREFIX: &str = "ATTACHMENTS_";

/// Loads [`AttachmentsConfig`] from every configured source.
///
/// No caching is performed; every call to [`ConfigProvider::load`] reads the
/// sources again.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    project_root: Option<PathBuf>,
    discovery: FileDiscovery,
    explicit_file: Option<PathBuf>,
    use_env: bool,
}

impl ConfigProvider {
    /// Defaults and environment variables only.
    pub fn new() -> Self {
        Self {
            project_root: None,
            discovery: FileDiscovery::new(),
            explicit_file: None,
            use_env: true,
        }
    }

    /// Discover files under `<root>/.attachments/` and anchor relative paths
    /// at `root`.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.discovery = self.discovery.with_project_root(&root);
        self.project_root = Some(root);
        self
    }

    /// Also read `~/.attachments/`.
    pub fn with_home_config(mut self) -> Self {
        self.discovery = self.discovery.with_home();
        self
    }

    /// Merge one more file after the discovered ones. It must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Skip `ATTACHMENTS_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Build, extract and validate the configuration.
    pub fn load(&self) -> ConfigResult<AttachmentsConfig> {
        let figment = self.build_figment()?;
        let mut config: AttachmentsConfig = figment.extract()?;

        self.anchor_field_type_paths(&figment, &mut config)?;
        config.validate()?;

        debug!(
            field_types = config.field_types.len(),
            instances = config.instances.len(),
            register_default_instance = config.register_default_instance,
            "loaded attachments configuration"
        );
        Ok(config)
    }

    /// Anchor each relative `field_types[].path` at the directory of the file
    /// that declared it. Paths from the environment are anchored at the
    /// project root, when there is one.
    fn anchor_field_type_paths(
        &self,
        figment: &Figment,
        config: &mut AttachmentsConfig,
    ) -> ConfigResult<()> {
        let declared: Vec<DeclaredPath> = figment.extract_inner("field_types")?;
        for (field_type, declared) in config.field_types.iter_mut().zip(declared) {
            let original = declared.path.original();
            if !original.is_relative() {
                continue;
            }
            let base = match declared.path.metadata_path() {
                Some(file) => Some(declaring_dir(file)),
                None => self.project_root.clone(),
            };
            if let Some(base) = base {
                trace!("anchoring {} at {}", original.display(), base.display());
                field_type.path = base.join(original);
            }
        }
        Ok(())
    }

    /// Sources in precedence order, later ones overriding earlier ones.
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(AttachmentsConfig::default()));

        for file in self.discovery.discover_all() {
            figment = figment.merge(file_provider(&file));
        }

        if let Some(ref path) = self.explicit_file {
            figment = figment.merge(explicit_provider(path)?);
        }

        if self.use_env {
            trace!("merging {ENV_PREFIX}* environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// A `field_types` entry seen through figment, remembering its source file.
#[derive(Deserialize)]
struct DeclaredPath {
    path: RelativePathBuf,
}

/// Base directory for paths declared in `file`. Files inside a
/// `.attachments/` directory resolve against that directory's parent.
fn declaring_dir(file: &Path) -> PathBuf {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let dir = if dir.file_name() == Some(OsStr::new(CONFIG_DIR)) {
        dir.parent().unwrap_or(dir)
    } else {
        dir
    };
    dir.to_path_buf()
}

fn file_provider(file: &ConfigFile) -> Figment {
    trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
        ConfigFormat::Json => Figment::from(Json::file(&file.path)),
    }
}

fn explicit_provider(path: &Path) -> ConfigResult<Figment> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    Ok(file_provider(&ConfigFile {
        path: path.to_path_buf(),
        format,
        scope: crate::discovery::ConfigScope::Project,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_sources() {
        let config = ConfigProvider::new().without_env().load().unwrap();
        assert_eq!(config, AttachmentsConfig::default());
    }

    #[test]
    fn project_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("attachments.toml"),
            r#"
register_default_instance = false

[[field_types]]
key = "notes"
path = "plugins/notes.yaml"

[[instances]]
name = "gallery"
label = "Gallery"
post_type = "product"
limit = 12
"#,
        )
        .unwrap();

        let config = ConfigProvider::new()
            .without_env()
            .with_project_root(tmp.path())
            .load()
            .unwrap();

        assert!(!config.register_default_instance);
        assert_eq!(config.field_types[0].key, "notes");
        assert_eq!(
            config.field_types[0].path,
            tmp.path().join("plugins/notes.yaml")
        );
        let gallery = &config.instances[0];
        assert_eq!(gallery.name, "gallery");
        assert_eq!(gallery.label.as_deref(), Some("Gallery"));
        assert_eq!(gallery.limit, Some(12));
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let err = ConfigProvider::new()
            .without_env()
            .with_file(tmp.path().join("missing.yaml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn explicit_file_with_unknown_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("attachments.ini");
        fs::write(&path, "").unwrap();
        let err = ConfigProvider::new()
            .without_env()
            .with_file(path)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("attachments.yaml");
        fs::write(&path, "register_default_instance: [not, a, bool]\n").unwrap();
        let err = ConfigProvider::new()
            .without_env()
            .with_file(path)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn explicit_file_paths_are_anchored_at_its_directory() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        let path = site.join("attachments.yaml");
        fs::write(
            &path,
            "field_types:\n  - key: notes\n    path: defs/notes.yaml\n  - key: abs\n    path: /opt/abs.yaml\n",
        )
        .unwrap();

        let config = ConfigProvider::new()
            .without_env()
            .with_file(&path)
            .load()
            .unwrap();

        assert_eq!(config.field_types[0].path, site.join("defs/notes.yaml"));
        assert_eq!(config.field_types[1].path, PathBuf::from("/opt/abs.yaml"));
    }

    #[test]
    fn declaring_dir_skips_config_directory() {
        assert_eq!(
            declaring_dir(Path::new("/srv/site/.attachments/attachments.toml")),
            PathBuf::from("/srv/site")
        );
        assert_eq!(
            declaring_dir(Path::new("/etc/attachments/override.yaml")),
            PathBuf::from("/etc/attachments")
        );
    }
}
