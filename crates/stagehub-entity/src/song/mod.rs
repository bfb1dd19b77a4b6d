//! Song profile entities.

pub mod model;
pub mod snapshot;

pub use model::Song;
pub use snapshot::SongSnapshot;
