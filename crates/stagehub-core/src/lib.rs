//! # stagehub-core
//!
//! Core crate for StageHub. Contains configuration schemas, shared value
//! types (versions, languages, pagination), the clock abstraction, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other StageHub crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
