//! Principal role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use stagehub_core::AppError;

/// Roles a principal can hold.
///
/// Staff roles are scoped: an `AgencyStaff` principal acts only within its
/// own agency, `GroupStaff` within its groups, `TalentStaff` for its
/// talents. `Admin` is unscoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "principal_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PrincipalRole {
    /// Full system administrator, unscoped.
    Admin,
    /// Staff member of one agency.
    AgencyStaff,
    /// Staff member managing specific groups.
    GroupStaff,
    /// Staff member managing specific talents.
    TalentStaff,
    /// Read-only access.
    Viewer,
}

impl PrincipalRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::AgencyStaff => "agency_staff",
            Self::GroupStaff => "group_staff",
            Self::TalentStaff => "talent_staff",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for PrincipalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "agency_staff" => Ok(Self::AgencyStaff),
            "group_staff" => Ok(Self::GroupStaff),
            "talent_staff" => Ok(Self::TalentStaff),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::validation(format!(
                "Invalid principal role: '{s}'. Expected one of: admin, agency_staff, group_staff, talent_staff, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<PrincipalRole>().unwrap(), PrincipalRole::Admin);
        assert_eq!(
            "agency_staff".parse::<PrincipalRole>().unwrap(),
            PrincipalRole::AgencyStaff
        );
        assert!("superuser".parse::<PrincipalRole>().is_err());
    }
}
