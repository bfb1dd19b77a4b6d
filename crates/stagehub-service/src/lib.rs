//! # stagehub-service
//!
//! Business logic service layer for StageHub. Each service orchestrates
//! repositories, policy evaluation, and history recording to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. The rollback service is
//! generic over the content store port so the same algorithm serves every
//! content kind.

pub mod context;
pub mod history;
pub mod rollback;

pub use context::RequestContext;
pub use history::HistoryService;
pub use rollback::{RollbackError, RollbackService};
