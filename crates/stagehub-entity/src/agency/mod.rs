//! Agency profile entities.

pub mod model;
pub mod snapshot;

pub use model::Agency;
pub use snapshot::AgencySnapshot;
