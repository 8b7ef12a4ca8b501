//! Configuration file discovery
//!
//! Looks for `attachments.{toml,yaml,yml,json}` inside a `.attachments/`
//! directory of the project root and, optionally, of the user's home.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Name of the directory holding configuration files.
pub const CONFIG_DIR: &str = ".attachments";

const FILE_CANDIDATES: [&str; 4] = [
    "attachments.toml",
    "attachments.yaml",
    "attachments.yml",
    "attachments.json",
];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file
    pub format: ConfigFormat,
    /// Where the file was found
    pub scope: ConfigScope,
}

/// Configuration file format detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Where a configuration file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// `~/.attachments/`
    Global,
    /// `<project>/.attachments/`
    Project,
}

/// Finds configuration files in priority order.
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery with no directories to search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `<root>/.attachments/`.
    pub fn with_project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_dir = Some(root.as_ref().join(CONFIG_DIR));
        self
    }

    /// Search `~/.attachments/` when the home directory can be determined.
    pub fn with_home(mut self) -> Self {
        self.global_dir = dirs::home_dir().map(|home| home.join(CONFIG_DIR));
        self
    }

    /// Search an arbitrary directory as the global scope.
    pub fn with_global_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_dir = Some(dir.into());
        self
    }

    /// All configuration files, lowest priority first so figment can merge
    /// them in order.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        if let Some(ref dir) = self.global_dir {
            files.extend(search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = self.project_dir {
            files.extend(search_directory(dir, ConfigScope::Project));
        }

        debug!(count = files.len(), "discovered configuration files");
        files
    }
}

fn search_directory(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
    if !dir.exists() {
        trace!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }
    if !dir.is_dir() {
        warn!("Path exists but is not a directory: {}", dir.display());
        return Vec::new();
    }

    FILE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .filter(|candidate| candidate.is_file())
        .filter_map(|path| {
            let format = ConfigFormat::from_path(&path)?;
            trace!("Found config: {} ({:?})", path.display(), format);
            Some(ConfigFile {
                path,
                format,
                scope,
            })
        })
        .collect()
}
