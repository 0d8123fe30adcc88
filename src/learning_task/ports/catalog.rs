//! Read-only lookups against the external language and framework catalog.

use crate::learning_task::domain::{FrameworkId, LanguageId};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog lookup contract.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns the languages in `ids` the catalog does not know, in
    /// ascending order.
    async fn unresolved_languages(
        &self,
        ids: &BTreeSet<LanguageId>,
    ) -> CatalogResult<Vec<LanguageId>>;

    /// Returns the frameworks in `ids` the catalog does not know, in
    /// ascending order.
    async fn unresolved_frameworks(
        &self,
        ids: &BTreeSet<FrameworkId>,
    ) -> CatalogResult<Vec<FrameworkId>>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The catalog could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a lookup failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
