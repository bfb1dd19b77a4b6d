//! # stagehub-auth
//!
//! Policy evaluation for StageHub. Decides whether a principal may perform
//! an action on a content resource, combining a static role-to-action table
//! with scope containment checks (agency / group / talent ownership).

pub mod policy;

pub use policy::{PolicyEvaluator, ScopedPolicy};
