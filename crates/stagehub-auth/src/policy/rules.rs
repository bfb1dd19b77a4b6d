//! Role-to-action mapping definitions.

use stagehub_entity::permission::Action;
use stagehub_entity::principal::PrincipalRole;

/// Return the actions a role may perform, before scope checks.
///
/// Admin is handled by the evaluator's bypass and is listed here only for
/// completeness. Rollback is deliberately restricted to agency staff and
/// admins: it rewrites every language variant of an item at once.
pub fn allowed_actions(role: PrincipalRole) -> &'static [Action] {
    match role {
        PrincipalRole::Admin => &[
            Action::View,
            Action::Edit,
            Action::Publish,
            Action::Translate,
            Action::Rollback,
        ],
        PrincipalRole::AgencyStaff => &[
            Action::View,
            Action::Edit,
            Action::Publish,
            Action::Translate,
            Action::Rollback,
        ],
        PrincipalRole::GroupStaff => &[
            Action::View,
            Action::Edit,
            Action::Publish,
            Action::Translate,
        ],
        PrincipalRole::TalentStaff => &[Action::View, Action::Edit, Action::Translate],
        PrincipalRole::Viewer => &[Action::View],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_requires_agency_staff_or_admin() {
        assert!(allowed_actions(PrincipalRole::Admin).contains(&Action::Rollback));
        assert!(allowed_actions(PrincipalRole::AgencyStaff).contains(&Action::Rollback));
        assert!(!allowed_actions(PrincipalRole::GroupStaff).contains(&Action::Rollback));
        assert!(!allowed_actions(PrincipalRole::TalentStaff).contains(&Action::Rollback));
        assert!(!allowed_actions(PrincipalRole::Viewer).contains(&Action::Rollback));
    }

    #[test]
    fn test_everyone_can_view() {
        for role in [
            PrincipalRole::Admin,
            PrincipalRole::AgencyStaff,
            PrincipalRole::GroupStaff,
            PrincipalRole::TalentStaff,
            PrincipalRole::Viewer,
        ] {
            assert!(allowed_actions(role).contains(&Action::View));
        }
    }
}
