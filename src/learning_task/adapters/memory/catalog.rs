//! In-memory language and framework catalog.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::learning_task::{
    domain::{FrameworkId, LanguageId},
    ports::{CatalogError, CatalogLookup, CatalogResult},
};

/// Thread-safe in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogEntries>>,
}

#[derive(Debug, Default)]
struct CatalogEntries {
    languages: BTreeSet<LanguageId>,
    frameworks: BTreeSet<FrameworkId>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with the given entries.
    #[must_use]
    pub fn with_entries(
        languages: impl IntoIterator<Item = LanguageId>,
        frameworks: impl IntoIterator<Item = FrameworkId>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogEntries {
                languages: languages.into_iter().collect(),
                frameworks: frameworks.into_iter().collect(),
            })),
        }
    }

    /// Adds a language to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the catalog lock is poisoned.
    pub fn add_language(&self, id: LanguageId) -> CatalogResult<()> {
        let mut entries = self.state.write().map_err(lock_error)?;
        entries.languages.insert(id);
        Ok(())
    }

    /// Adds a framework to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the catalog lock is poisoned.
    pub fn add_framework(&self, id: FrameworkId) -> CatalogResult<()> {
        let mut entries = self.state.write().map_err(lock_error)?;
        entries.frameworks.insert(id);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> CatalogError {
    CatalogError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn unresolved_languages(
        &self,
        ids: &BTreeSet<LanguageId>,
    ) -> CatalogResult<Vec<LanguageId>> {
        let entries = self.state.read().map_err(lock_error)?;
        Ok(ids.difference(&entries.languages).copied().collect())
    }

    async fn unresolved_frameworks(
        &self,
        ids: &BTreeSet<FrameworkId>,
    ) -> CatalogResult<Vec<FrameworkId>> {
        let entries = self.state.read().map_err(lock_error)?;
        Ok(ids.difference(&entries.frameworks).copied().collect())
    }
}
