//! Which instances apply to a content category.

use tracing::debug;

use crate::category::CategoryDetector;
use crate::registry::InstanceRegistry;

/// Filters registered instances by content category.
#[derive(Clone, Copy)]
pub struct InstanceResolver<'a> {
    registry: &'a InstanceRegistry,
    detector: &'a dyn CategoryDetector,
}

impl<'a> InstanceResolver<'a> {
    /// Resolver over `registry`, consulting `detector` for fallbacks.
    pub fn new(registry: &'a InstanceRegistry, detector: &'a dyn CategoryDetector) -> Self {
        Self { registry, detector }
    }

    /// Names of instances applicable to `category`, in registration order.
    ///
    /// A missing category, or one the detector says does not exist, is
    /// replaced by the detector's current category.
    pub fn instances_for_category(&self, category: Option<&str>) -> Vec<String> {
        let category = match category {
            Some(c) if self.detector.category_exists(c) => c.to_string(),
            _ => self.detector.detect_current_category(),
        };

        let names: Vec<String> = self
            .registry
            .iter()
            .filter(|instance| instance.accepts(&category))
            .map(|instance| instance.name().to_string())
            .collect();
        debug!(category = %category, instances = ?names, "resolved instances for category");
        names
    }
}
