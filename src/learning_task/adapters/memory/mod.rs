//! In-memory adapters for every learning task port.
//!
//! Suitable for tests and for hosts that keep moderation state in process.

mod catalog;
mod like;
mod quota;
mod review;
mod task;

pub use catalog::InMemoryCatalog;
pub use like::InMemoryLikeLedger;
pub use quota::InMemoryTaskQuota;
pub use review::InMemoryReviewLedger;
pub use task::InMemoryTaskRepository;
