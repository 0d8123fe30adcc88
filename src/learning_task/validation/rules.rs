//! Individual validation rule implementations.
//!
//! Each rule is a pure function checking one field. Rules return the parsed
//! value on success or a specific `ValidationError` on failure.

use crate::learning_task::{
    domain::{
        LanguageId, Rating, RepositoryLink, ReviewFeedback, TaskDescription, TaskTitle,
        ValidationError,
    },
    ports::ValidationConfig,
};

/// Parses a title and enforces the configured length.
///
/// # Errors
///
/// Returns `ValidationError::EmptyTitle` or `ValidationError::TitleTooLong`.
pub fn parse_title(raw: &str, config: &ValidationConfig) -> Result<TaskTitle, ValidationError> {
    let title = TaskTitle::new(raw)?;
    let actual = title.char_count();
    if actual > config.max_title_length {
        return Err(ValidationError::TitleTooLong {
            max: config.max_title_length,
            actual,
        });
    }
    Ok(title)
}

/// Parses a description and enforces the configured length.
///
/// # Errors
///
/// Returns `ValidationError::EmptyDescription` or
/// `ValidationError::DescriptionTooLong`.
pub fn parse_description(
    raw: &str,
    config: &ValidationConfig,
) -> Result<TaskDescription, ValidationError> {
    let description = TaskDescription::new(raw)?;
    let actual = description.char_count();
    if actual > config.max_description_length {
        return Err(ValidationError::DescriptionTooLong {
            max: config.max_description_length,
            actual,
        });
    }
    Ok(description)
}

/// Parses an optional repository link.
///
/// Absent and blank links both mean "no link".
///
/// # Errors
///
/// Returns `ValidationError::RepositoryLinkTooLong` or
/// `ValidationError::RepositoryLinkPrefix`.
pub fn parse_repository_link(
    raw: Option<&str>,
    config: &ValidationConfig,
) -> Result<Option<RepositoryLink>, ValidationError> {
    let Some(link) = raw.and_then(RepositoryLink::parse) else {
        return Ok(None);
    };

    let actual = link.as_str().chars().count();
    if actual > config.max_repository_link_length {
        return Err(ValidationError::RepositoryLinkTooLong {
            max: config.max_repository_link_length,
            actual,
        });
    }

    if !link.as_str().starts_with(&config.repository_link_prefix) {
        return Err(ValidationError::RepositoryLinkPrefix {
            link: link.as_str().to_owned(),
            prefix: config.repository_link_prefix.clone(),
        });
    }

    Ok(Some(link))
}

/// Requires at least one language.
///
/// # Errors
///
/// Returns `ValidationError::NoLanguages` for an empty selection.
pub const fn validate_languages(languages: &[LanguageId]) -> Result<(), ValidationError> {
    if languages.is_empty() {
        return Err(ValidationError::NoLanguages);
    }
    Ok(())
}

/// Parses a rating.
///
/// # Errors
///
/// Returns `ValidationError::RatingOutOfRange` outside 1..=5.
pub const fn parse_rating(raw: u8) -> Result<Rating, ValidationError> {
    Rating::new(raw)
}

/// Parses review feedback and enforces the configured length.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFeedback` or
/// `ValidationError::FeedbackTooLong`.
pub fn parse_feedback(
    raw: &str,
    config: &ValidationConfig,
) -> Result<ReviewFeedback, ValidationError> {
    let feedback = ReviewFeedback::new(raw)?;
    let actual = feedback.char_count();
    if actual > config.max_feedback_length {
        return Err(ValidationError::FeedbackTooLong {
            max: config.max_feedback_length,
            actual,
        });
    }
    Ok(feedback)
}
