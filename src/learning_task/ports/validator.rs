//! Validator port for task content and review input.

use crate::learning_task::domain::{
    FrameworkId, LanguageId, Rating, ReviewFeedback, TaskContent, ValidationError,
};
use serde::Deserialize;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unvalidated task fields as submitted by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Raw title.
    pub title: String,
    /// Raw description.
    pub description: String,
    /// Raw repository link; blank means none.
    pub repository_link: Option<String>,
    /// Visibility flag.
    pub is_public: bool,
    /// Selected languages.
    pub languages: Vec<LanguageId>,
    /// Selected frameworks.
    pub frameworks: Vec<FrameworkId>,
}

impl TaskDraft {
    /// Rebuilds a draft from existing validated content.
    #[must_use]
    pub fn from_content(content: &TaskContent) -> Self {
        Self {
            title: content.title().as_str().to_owned(),
            description: content.description().as_str().to_owned(),
            repository_link: content
                .repository_link()
                .map(|link| link.as_str().to_owned()),
            is_public: content.is_public(),
            languages: content.languages().iter().copied().collect(),
            frameworks: content.frameworks().iter().copied().collect(),
        }
    }
}

/// Port for validating owner and reviewer input.
///
/// Implementations should:
/// - Collect every field-level failure of a task draft before returning
/// - Report only the first failure of review input
/// - Be stateless and thread-safe
pub trait TaskContentValidator: Send + Sync {
    /// Validates a task draft and builds its content.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError`, combining several failures with
    /// `ValidationError::Multiple`.
    fn validate_content(&self, draft: &TaskDraft) -> ValidationResult<TaskContent>;

    /// Validates review input.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    fn validate_review(
        &self,
        rating: u8,
        feedback: &str,
    ) -> ValidationResult<(Rating, ReviewFeedback)>;
}

/// Configuration for validation rules.
///
/// # Examples
///
/// ```
/// use assay::learning_task::ports::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.max_title_length, 100);
/// assert_eq!(config.repository_link_prefix, "https://github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum title length in characters.
    pub max_title_length: usize,
    /// Maximum description length in characters.
    pub max_description_length: usize,
    /// Maximum repository link length in characters.
    pub max_repository_link_length: usize,
    /// Prefix every repository link must start with.
    pub repository_link_prefix: String,
    /// Maximum review feedback length in characters.
    pub max_feedback_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_title_length: 100,
            max_description_length: 20_000,
            max_repository_link_length: 500,
            repository_link_prefix: "https://github.com/".to_owned(),
            max_feedback_length: 5_000,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration with tighter text limits.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_description_length: 5_000,
            max_feedback_length: 1_000,
            ..Self::default()
        }
    }

    /// Creates a lenient configuration accepting any HTTPS repository host.
    ///
    /// Useful for deployments that host work outside GitHub.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            repository_link_prefix: "https://".to_owned(),
            ..Self::default()
        }
    }
}
