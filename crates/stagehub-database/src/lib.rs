//! # stagehub-database
//!
//! PostgreSQL connection management, concrete repository implementations
//! for all StageHub entities, and the per-kind content store adapters used
//! by the service layer.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
