//! Core type definitions used across the StageHub workspace.

pub mod language;
pub mod pagination;
pub mod version;

pub use language::Language;
pub use pagination::{PageRequest, PageResponse};
pub use version::Version;
