//! Role-based authorization policy.
//!
//! The single decision point for which roles may perform which operation on
//! which resource. Handlers ask here instead of comparing role
//! discriminants.

use crate::domain::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Archive,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Tenant,
    Property,
    Lease,
}

/// Admins may do everything. Property managers and staff read everything,
/// hold full write access on leases and may create/update properties, but
/// tenant and user records are shaped and archived by admins only. Users
/// without an assigned role are read-only.
pub fn can_perform(role: Option<Role>, operation: Operation, resource: ResourceKind) -> bool {
    use Operation::*;
    use ResourceKind::*;

    let Some(role) = role else {
        return operation == Read;
    };

    match role {
        Role::Admin => true,
        Role::PropertyManager | Role::Staff => match (operation, resource) {
            (Read, _) => true,
            (_, Lease) => true,
            (Create | Update, Property) => true,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operation::*;
    use ResourceKind::*;

    #[test]
    fn admin_can_do_everything() {
        for op in [Read, Create, Update, Archive, Delete] {
            for res in [User, Tenant, Property, Lease] {
                assert!(can_perform(Some(Role::Admin), op, res));
            }
        }
    }

    #[test]
    fn property_manager_cannot_archive_tenants_or_users() {
        assert!(!can_perform(Some(Role::PropertyManager), Archive, Tenant));
        assert!(!can_perform(Some(Role::PropertyManager), Archive, User));
        assert!(!can_perform(Some(Role::PropertyManager), Delete, Tenant));
        assert!(!can_perform(Some(Role::PropertyManager), Create, Tenant));
    }

    #[test]
    fn staff_and_pm_hold_full_lease_access() {
        for role in [Role::PropertyManager, Role::Staff] {
            for op in [Read, Create, Update, Delete] {
                assert!(can_perform(Some(role), op, Lease));
            }
        }
    }

    #[test]
    fn pm_may_shape_properties_but_not_archive_them() {
        assert!(can_perform(Some(Role::PropertyManager), Create, Property));
        assert!(can_perform(Some(Role::PropertyManager), Update, Property));
        assert!(!can_perform(Some(Role::PropertyManager), Archive, Property));
    }

    #[test]
    fn everyone_authenticated_may_read() {
        for role in [None, Some(Role::PropertyManager), Some(Role::Staff)] {
            for res in [User, Tenant, Property, Lease] {
                assert!(can_perform(role, Read, res));
            }
        }
    }

    #[test]
    fn unassigned_role_is_read_only() {
        assert!(!can_perform(None, Create, Lease));
        assert!(!can_perform(None, Update, Property));
        assert!(!can_perform(None, Archive, Tenant));
    }
}
