//! Group profile entities.

pub mod model;
pub mod snapshot;

pub use model::Group;
pub use snapshot::GroupSnapshot;
