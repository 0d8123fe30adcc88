//! Validated field values for task content and reviews.

use super::{FrameworkId, LanguageId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $empty:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a trimmed, non-empty value.
            ///
            /// # Errors
            ///
            /// Returns the field's empty-value [`ValidationError`] when the
            /// input is blank.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err($empty);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the length in characters.
            #[must_use]
            pub fn char_count(&self) -> usize {
                self.0.chars().count()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

non_empty_text! {
    /// Task title.
    TaskTitle, ValidationError::EmptyTitle
}

non_empty_text! {
    /// Task description.
    TaskDescription, ValidationError::EmptyDescription
}

non_empty_text! {
    /// Written feedback attached to a review.
    ReviewFeedback, ValidationError::EmptyFeedback
}

/// Link to the repository holding the task's work.
///
/// Host prefix and length limits are configuration-driven and checked by the
/// task content validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryLink(String);

impl RepositoryLink {
    /// Normalizes raw input, treating a blank value as "no link".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Returns the link as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review rating, an integer from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RatingOutOfRange`] outside 1..=5.
    pub const fn new(value: u8) -> Result<Self, ValidationError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(ValidationError::RatingOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Owner-editable content of a learning task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContent {
    title: TaskTitle,
    description: TaskDescription,
    repository_link: Option<RepositoryLink>,
    is_public: bool,
    languages: BTreeSet<LanguageId>,
    frameworks: BTreeSet<FrameworkId>,
}

impl TaskContent {
    /// Creates public content with no repository link and no frameworks.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoLanguages`] when `languages` is empty.
    pub fn new(
        title: TaskTitle,
        description: TaskDescription,
        languages: impl IntoIterator<Item = LanguageId>,
    ) -> Result<Self, ValidationError> {
        let language_set: BTreeSet<LanguageId> = languages.into_iter().collect();
        if language_set.is_empty() {
            return Err(ValidationError::NoLanguages);
        }
        Ok(Self {
            title,
            description,
            repository_link: None,
            is_public: true,
            languages: language_set,
            frameworks: BTreeSet::new(),
        })
    }

    /// Sets the repository link.
    #[must_use]
    pub fn with_repository_link(mut self, link: Option<RepositoryLink>) -> Self {
        self.repository_link = link;
        self
    }

    /// Sets the visibility flag.
    #[must_use]
    pub const fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Sets the framework references.
    #[must_use]
    pub fn with_frameworks(mut self, frameworks: impl IntoIterator<Item = FrameworkId>) -> Self {
        self.frameworks = frameworks.into_iter().collect();
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the repository link, if any.
    #[must_use]
    pub const fn repository_link(&self) -> Option<&RepositoryLink> {
        self.repository_link.as_ref()
    }

    /// Returns `true` when the task is publicly visible.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Returns the referenced languages; never empty.
    #[must_use]
    pub const fn languages(&self) -> &BTreeSet<LanguageId> {
        &self.languages
    }

    /// Returns the referenced frameworks.
    #[must_use]
    pub const fn frameworks(&self) -> &BTreeSet<FrameworkId> {
        &self.frameworks
    }
}
