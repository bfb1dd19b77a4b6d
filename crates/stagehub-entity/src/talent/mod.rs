//! Talent profile entities.

pub mod model;
pub mod snapshot;

pub use model::Talent;
pub use snapshot::TalentSnapshot;
