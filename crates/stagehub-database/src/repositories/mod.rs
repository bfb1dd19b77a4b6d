//! Repository implementations for all StageHub entities.

pub mod agency;
pub mod group;
pub mod history;
pub mod principal;
pub mod song;
pub mod talent;

pub use agency::{AgencyRepository, AgencySnapshotRepository};
pub use group::{GroupRepository, GroupSnapshotRepository};
pub use history::HistoryRepository;
pub use principal::PrincipalRepository;
pub use song::{SongRepository, SongSnapshotRepository};
pub use talent::{TalentRepository, TalentSnapshotRepository};
