//! Validation service implementation.
//!
//! Provides the default implementation of the `TaskContentValidator` port,
//! combining individual rules and collecting every field-level failure of a
//! task draft.

use crate::learning_task::{
    domain::{Rating, ReviewFeedback, TaskContent, ValidationError},
    ports::{TaskContentValidator, TaskDraft, ValidationConfig, ValidationResult},
    validation::rules,
};

/// Default implementation of the task content validator.
///
/// # Examples
///
/// ```
/// use assay::learning_task::domain::LanguageId;
/// use assay::learning_task::ports::{TaskContentValidator, TaskDraft};
/// use assay::learning_task::validation::DefaultTaskValidator;
///
/// let draft = TaskDraft {
///     title: "Build a tokenizer".to_owned(),
///     description: "Hand-written lexer".to_owned(),
///     repository_link: None,
///     is_public: true,
///     languages: vec![LanguageId::new(1)],
///     frameworks: Vec::new(),
/// };
///
/// let validator = DefaultTaskValidator::new();
/// assert!(validator.validate_content(&draft).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DefaultTaskValidator {
    config: ValidationConfig,
}

impl DefaultTaskValidator {
    /// Creates a validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Creates a validator with custom configuration.
    #[must_use]
    pub const fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the current validation configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl Default for DefaultTaskValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskContentValidator for DefaultTaskValidator {
    fn validate_content(&self, draft: &TaskDraft) -> ValidationResult<TaskContent> {
        let mut errors = Vec::new();

        let title = collect(&mut errors, rules::parse_title(&draft.title, &self.config));
        let description = collect(
            &mut errors,
            rules::parse_description(&draft.description, &self.config),
        );
        let repository_link = collect(
            &mut errors,
            rules::parse_repository_link(draft.repository_link.as_deref(), &self.config),
        );
        collect(&mut errors, rules::validate_languages(&draft.languages));

        let (Some(title_value), Some(description_value), Some(link_value)) =
            (title, description, repository_link)
        else {
            return Err(combine(errors));
        };
        if !errors.is_empty() {
            return Err(combine(errors));
        }

        let content = TaskContent::new(
            title_value,
            description_value,
            draft.languages.iter().copied(),
        )?
        .with_repository_link(link_value)
        .with_visibility(draft.is_public)
        .with_frameworks(draft.frameworks.iter().copied());
        Ok(content)
    }

    fn validate_review(
        &self,
        rating: u8,
        feedback: &str,
    ) -> ValidationResult<(Rating, ReviewFeedback)> {
        let parsed_rating = rules::parse_rating(rating)?;
        let parsed_feedback = rules::parse_feedback(feedback, &self.config)?;
        Ok((parsed_rating, parsed_feedback))
    }
}

/// Records a failed rule and returns the parsed value of a passing one.
fn collect<T>(
    errors: &mut Vec<ValidationError>,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

/// Combines collected failures; `errors` is non-empty at every call site.
fn combine(errors: Vec<ValidationError>) -> ValidationError {
    ValidationError::multiple(errors).unwrap_or_else(|| ValidationError::Multiple(Vec::new()))
}
