//! Content store adapters.
//!
//! Each adapter implements the service layer's [`ContentStore`] port for
//! one content kind by composing that kind's repositories. The write path
//! (`persist_rollback`) wraps every mutation of one rollback in a single
//! database transaction.
//!
//! [`ContentStore`]: stagehub_entity::store::ContentStore

pub mod agency;
pub mod group;
pub mod song;
pub mod talent;

pub use agency::AgencyStore;
pub use group::GroupStore;
pub use song::SongStore;
pub use talent::TalentStore;
