//! Actions a principal can perform on published content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action requested against a content resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read published content and its history.
    View,
    /// Edit a draft of the content.
    Edit,
    /// Approve and publish a draft.
    Publish,
    /// Add or regenerate a language variant.
    Translate,
    /// Restore a translation set to an earlier snapshot.
    Rollback,
}

impl Action {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Publish => "publish",
            Self::Translate => "translate",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
