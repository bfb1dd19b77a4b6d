//! Rollback of published content to an earlier snapshot.

pub mod error;
pub mod service;

pub use error::RollbackError;
pub use service::RollbackService;
