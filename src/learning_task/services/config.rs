//! Engine configuration.

use crate::learning_task::ports::ValidationConfig;
use serde::Deserialize;

/// Configuration for the lifecycle engine.
///
/// # Examples
///
/// ```
/// use assay::learning_task::services::LifecycleConfig;
///
/// let config = LifecycleConfig::default();
/// assert_eq!(config.max_conflict_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Field validation limits.
    pub validation: ValidationConfig,
    /// Extra attempts after a conflicting write before surfacing it.
    pub max_conflict_retries: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            max_conflict_retries: 3,
        }
    }
}

impl LifecycleConfig {
    /// Creates a configuration that never retries conflicts.
    ///
    /// Useful when the host wants to surface every conflict to its caller.
    #[must_use]
    pub fn without_retries() -> Self {
        Self {
            max_conflict_retries: 0,
            ..Self::default()
        }
    }

    /// Replaces the validation settings.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}
