//! Scoped policy evaluator.
//!
//! Evaluation order:
//! 1. Admin bypass — admins may do anything.
//! 2. Role table — the role must allow the requested action at all.
//! 3. Scope containment — scoped staff roles must own the resource's
//!    agency / group / talent ids.

use tracing::debug;
use uuid::Uuid;

use stagehub_entity::permission::{Action, ResourceScope};
use stagehub_entity::principal::{Principal, PrincipalRole};

use super::rules::allowed_actions;

/// Decides whether a principal may perform an action on a resource.
///
/// Consumed by the service layer as a black box: it only supplies a
/// resource descriptor and honors the boolean result.
pub trait PolicyEvaluator: Send + Sync + 'static {
    /// Evaluate whether `principal` may perform `action` on `resource`.
    fn evaluate(&self, principal: &Principal, action: Action, resource: &ResourceScope) -> bool;
}

/// The standard StageHub policy: static role table plus scope matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedPolicy;

impl ScopedPolicy {
    /// Creates a new scoped policy.
    pub fn new() -> Self {
        Self
    }

    fn scope_matches(principal: &Principal, resource: &ResourceScope) -> bool {
        match principal.role {
            PrincipalRole::Admin => true,
            // Viewers are unscoped; the role table already limits them to View.
            PrincipalRole::Viewer => true,
            PrincipalRole::AgencyStaff => match (principal.agency_id, resource.agency_id) {
                (Some(own), Some(target)) => own == target,
                _ => false,
            },
            PrincipalRole::GroupStaff => {
                agency_matches(principal.agency_id, resource.agency_id)
                    && intersects(&principal.group_ids, &resource.group_ids)
            }
            PrincipalRole::TalentStaff => {
                agency_matches(principal.agency_id, resource.agency_id)
                    && intersects(&principal.talent_ids, &resource.talent_ids)
            }
        }
    }
}

impl PolicyEvaluator for ScopedPolicy {
    fn evaluate(&self, principal: &Principal, action: Action, resource: &ResourceScope) -> bool {
        if principal.role.is_admin() {
            return true;
        }

        if !allowed_actions(principal.role).contains(&action) {
            debug!(
                principal_id = %principal.id,
                role = %principal.role,
                action = %action,
                "Action not permitted for role"
            );
            return false;
        }

        let granted = Self::scope_matches(principal, resource);
        if !granted {
            debug!(
                principal_id = %principal.id,
                role = %principal.role,
                action = %action,
                kind = %resource.kind,
                "Resource outside principal scope"
            );
        }
        granted
    }
}

/// An agency-scoped principal with no agency set matches nothing; a
/// resource with no owning agency is only reachable by admins.
fn agency_matches(own: Option<Uuid>, target: Option<Uuid>) -> bool {
    match (own, target) {
        (Some(own), Some(target)) => own == target,
        _ => false,
    }
}

fn intersects(a: &[Uuid], b: &[Uuid]) -> bool {
    a.iter().any(|id| b.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(role: PrincipalRole, agency_id: Option<Uuid>) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "staff".to_string(),
            role,
            agency_id,
            group_ids: Vec::new(),
            talent_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_bypasses_scope() {
        let admin = principal(PrincipalRole::Admin, None);
        let scope = ResourceScope::agency(Uuid::new_v4());
        assert!(ScopedPolicy::new().evaluate(&admin, Action::Rollback, &scope));
    }

    #[test]
    fn test_agency_staff_rollback_own_agency_only() {
        let agency = Uuid::new_v4();
        let staff = principal(PrincipalRole::AgencyStaff, Some(agency));
        let policy = ScopedPolicy::new();

        let own = ResourceScope::group(agency, Uuid::new_v4());
        assert!(policy.evaluate(&staff, Action::Rollback, &own));

        let other = ResourceScope::group(Uuid::new_v4(), Uuid::new_v4());
        assert!(!policy.evaluate(&staff, Action::Rollback, &other));
    }

    #[test]
    fn test_group_staff_cannot_rollback() {
        let agency = Uuid::new_v4();
        let group = Uuid::new_v4();
        let mut staff = principal(PrincipalRole::GroupStaff, Some(agency));
        staff.group_ids = vec![group];

        let scope = ResourceScope::group(agency, group);
        let policy = ScopedPolicy::new();
        assert!(policy.evaluate(&staff, Action::Edit, &scope));
        assert!(!policy.evaluate(&staff, Action::Rollback, &scope));
    }

    #[test]
    fn test_group_staff_scope_requires_group_overlap() {
        let agency = Uuid::new_v4();
        let mut staff = principal(PrincipalRole::GroupStaff, Some(agency));
        staff.group_ids = vec![Uuid::new_v4()];

        let scope = ResourceScope::group(agency, Uuid::new_v4());
        assert!(!ScopedPolicy::new().evaluate(&staff, Action::Edit, &scope));
    }

    #[test]
    fn test_viewer_can_only_view() {
        let viewer = principal(PrincipalRole::Viewer, None);
        let scope = ResourceScope::agency(Uuid::new_v4());
        let policy = ScopedPolicy::new();
        assert!(policy.evaluate(&viewer, Action::View, &scope));
        assert!(!policy.evaluate(&viewer, Action::Edit, &scope));
    }
}
