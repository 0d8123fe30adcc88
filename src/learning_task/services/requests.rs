//! Request payloads accepted by the lifecycle engine.

use crate::learning_task::{
    domain::{FrameworkId, LanguageId},
    ports::TaskDraft,
};

/// Request payload for creating a learning task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    repository_link: Option<String>,
    is_public: bool,
    languages: Vec<LanguageId>,
    frameworks: Vec<FrameworkId>,
}

impl CreateTaskRequest {
    /// Creates a public request with required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        languages: impl IntoIterator<Item = LanguageId>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            repository_link: None,
            is_public: true,
            languages: languages.into_iter().collect(),
            frameworks: Vec::new(),
        }
    }

    /// Sets the repository link.
    #[must_use]
    pub fn with_repository_link(mut self, link: impl Into<String>) -> Self {
        self.repository_link = Some(link.into());
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

    pub(crate) fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            repository_link: self.repository_link,
            is_public: self.is_public,
            languages: self.languages,
            frameworks: self.frameworks,
        }
    }
}

/// Partial update of a task's content. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    repository_link: Option<Option<String>>,
    is_public: Option<bool>,
    languages: Option<Vec<LanguageId>>,
    frameworks: Option<Vec<FrameworkId>>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the repository link.
    #[must_use]
    pub fn with_repository_link(mut self, link: impl Into<String>) -> Self {
        self.repository_link = Some(Some(link.into()));
        self
    }

    /// Removes the repository link.
    #[must_use]
    pub fn without_repository_link(mut self) -> Self {
        self.repository_link = Some(None);
        self
    }

    /// Replaces the visibility flag.
    #[must_use]
    pub const fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Replaces the language selection.
    #[must_use]
    pub fn with_languages(mut self, languages: impl IntoIterator<Item = LanguageId>) -> Self {
        self.languages = Some(languages.into_iter().collect());
        self
    }

    /// Replaces the framework selection.
    #[must_use]
    pub fn with_frameworks(mut self, frameworks: impl IntoIterator<Item = FrameworkId>) -> Self {
        self.frameworks = Some(frameworks.into_iter().collect());
        self
    }

    /// Overlays the set fields onto `draft`.
    pub(crate) fn apply_to(&self, mut draft: TaskDraft) -> TaskDraft {
        if let Some(title) = &self.title {
            draft.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            draft.description.clone_from(description);
        }
        if let Some(link) = &self.repository_link {
            draft.repository_link.clone_from(link);
        }
        if let Some(is_public) = self.is_public {
            draft.is_public = is_public;
        }
        if let Some(languages) = &self.languages {
            draft.languages.clone_from(languages);
        }
        if let Some(frameworks) = &self.frameworks {
            draft.frameworks.clone_from(frameworks);
        }
        draft
    }
}

/// Rating and feedback submitted by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    rating: u8,
    feedback: String,
}

impl ReviewRequest {
    /// Creates a review request.
    #[must_use]
    pub fn new(rating: u8, feedback: impl Into<String>) -> Self {
        Self {
            rating,
            feedback: feedback.into(),
        }
    }

    /// Returns the raw rating.
    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Returns the raw feedback.
    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}
