//! Edit history entities.

pub mod action;
pub mod model;

pub use action::HistoryAction;
pub use model::{HistoryRecord, NewHistoryRecord};
