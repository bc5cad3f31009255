//! Archival state machine shared by users and tenants.
//!
//! Two symmetric states; toggling is reversible and reports which direction
//! the transition went.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    Active,
    Archived,
}

impl ArchiveState {
    pub fn from_flag(archived: bool) -> Self {
        if archived {
            ArchiveState::Archived
        } else {
            ArchiveState::Active
        }
    }

    pub fn as_flag(self) -> bool {
        matches!(self, ArchiveState::Archived)
    }

    pub fn toggled(self) -> Self {
        match self {
            ArchiveState::Active => ArchiveState::Archived,
            ArchiveState::Archived => ArchiveState::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveToggle {
    pub archived: bool,
    pub message: String,
}

/// Flips the archival flag and words the confirmation for the direction
/// taken, e.g. `"Tenant archived"` vs `"Tenant unarchived"`.
pub fn toggle_archived(entity: &str, current: bool) -> ArchiveToggle {
    let next = ArchiveState::from_flag(current).toggled();
    let message = match next {
        ArchiveState::Archived => format!("{} archived", entity),
        ArchiveState::Active => format!("{} unarchived", entity),
    };
    ArchiveToggle {
        archived: next.as_flag(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let first = toggle_archived("Tenant", false);
        let second = toggle_archived("Tenant", first.archived);
        assert!(first.archived);
        assert!(!second.archived);
    }

    #[test]
    fn messages_name_the_direction() {
        assert_eq!(toggle_archived("Tenant", false).message, "Tenant archived");
        assert_eq!(toggle_archived("Tenant", true).message, "Tenant unarchived");
        assert_eq!(toggle_archived("User", false).message, "User archived");
    }

    #[test]
    fn state_round_trips_through_flag() {
        assert_eq!(ArchiveState::from_flag(true), ArchiveState::Archived);
        assert!(ArchiveState::Archived.as_flag());
        assert_eq!(ArchiveState::Archived.toggled(), ArchiveState::Active);
    }
}
