//! History action enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use stagehub_core::AppError;

/// The kind of change a history record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "history_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// A draft moved between approval statuses.
    DraftStatusChange,
    /// A draft was approved and published.
    Publish,
    /// A language variant was added or regenerated.
    Translate,
    /// A translation set was restored to an earlier snapshot.
    Rollback,
}

impl HistoryAction {
    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DraftStatusChange => "draft_status_change",
            Self::Publish => "publish",
            Self::Translate => "translate",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft_status_change" => Ok(Self::DraftStatusChange),
            "publish" => Ok(Self::Publish),
            "translate" => Ok(Self::Translate),
            "rollback" => Ok(Self::Rollback),
            _ => Err(AppError::validation(format!("Invalid history action: '{s}'"))),
        }
    }
}
