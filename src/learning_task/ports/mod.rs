//! Port contracts for learning task moderation.
//!
//! Ports define infrastructure-agnostic interfaces used by the lifecycle
//! engine: the Task Store, the two ledgers, the external catalog, the
//! creation quota, and input validation.

pub mod catalog;
pub mod like_ledger;
pub mod quota;
pub mod repository;
pub mod review_ledger;
pub mod validator;

pub use catalog::{CatalogError, CatalogLookup, CatalogResult};
pub use like_ledger::{LikeLedger, LikeLedgerError, LikeLedgerResult};
pub use quota::{QuotaError, QuotaResult, TaskQuota};
pub use repository::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
#[cfg(test)]
pub use repository::MockTaskRepository;
pub use review_ledger::{
    LedgerPosition, RemovedReview, ReviewLedger, ReviewLedgerError, ReviewLedgerResult,
};
pub use validator::{TaskContentValidator, TaskDraft, ValidationConfig, ValidationResult};
