//! Current content category detection.

use attachments_fields::instance_key;
use tracing::trace;

/// Category used when nothing else identifies one.
pub const DEFAULT_CATEGORY: &str = "post";

/// Host hook answering "which content category is being edited?".
pub trait CategoryDetector: Send + Sync {
    /// Category of the content currently being edited.
    fn detect_current_category(&self) -> String;

    /// Whether the host knows `category`. Unknown categories make the
    /// instance resolver fall back to [`detect_current_category`].
    ///
    /// [`detect_current_category`]: CategoryDetector::detect_current_category
    fn category_exists(&self, _category: &str) -> bool {
        true
    }
}

/// Detector fed from the request being served.
///
/// The first available of these wins:
///
/// 1. an explicit current category
/// 2. the category of the item being edited
/// 3. a category requested by the client (normalized like instance names)
/// 4. [`DEFAULT_CATEGORY`]
#[derive(Debug, Clone, Default)]
pub struct RequestCategoryDetector {
    current: Option<String>,
    item_category: Option<String>,
    requested: Option<String>,
    known: Vec<String>,
}

impl RequestCategoryDetector {
    /// A detector with no signals, answering [`DEFAULT_CATEGORY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Category already selected for the screen; wins over every other signal.
    pub fn with_current(mut self, category: impl Into<String>) -> Self {
        self.current = Some(category.into());
        self
    }

    /// Category of the item being edited.
    pub fn with_item_category(mut self, category: impl Into<String>) -> Self {
        self.item_category = Some(category.into());
        self
    }

    /// Category named by the client request. Blank requests are ignored.
    pub fn with_requested(mut self, category: &str) -> Self {
        let key = instance_key(category);
        self.requested = (!key.is_empty()).then_some(key);
        self
    }

    /// Restrict [`CategoryDetector::category_exists`] to `categories`. An
    /// empty list accepts everything.
    pub fn with_known_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known = categories.into_iter().map(Into::into).collect();
        self
    }
}

impl CategoryDetector for RequestCategoryDetector {
    fn detect_current_category(&self) -> String {
        let category = self
            .current
            .as_deref()
            .or(self.item_category.as_deref())
            .or(self.requested.as_deref())
            .unwrap_or(DEFAULT_CATEGORY);
        trace!(category, "detected current category");
        category.to_string()
    }

    fn category_exists(&self, category: &str) -> bool {
        self.known.is_empty() || self.known.iter().any(|known| known == category)
    }
}
