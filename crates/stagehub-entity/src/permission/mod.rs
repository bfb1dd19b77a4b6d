//! Permission vocabulary: actions, content kinds, and resource scopes.

pub mod action;
pub mod scope;

pub use action::Action;
pub use scope::{ContentKind, ResourceScope};
