//! Lease domain entity and active-lease selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binds a tenant to a property for `[date_time_start, date_time_end)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    pub id: i32,
    pub name: Option<String>,
    pub property_id: i32,
    pub tenant_id: i32,
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    pub date_time_start: DateTime<Utc>,
    pub date_time_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lease {
    /// Active iff `start <= as_of < end`.
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.date_time_start <= as_of && as_of < self.date_time_end
    }

    /// Half-open interval intersection.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.date_time_start < end && start < self.date_time_end
    }
}

/// Picks the lease whose interval contains `as_of`. When historical data
/// holds several matches, the most recently created wins; equal creation
/// times fall back to the larger id.
pub fn active_lease(leases: &[Lease], as_of: DateTime<Utc>) -> Option<&Lease> {
    leases
        .iter()
        .filter(|l| l.is_active_at(as_of))
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}

/// Lease attributes carried alongside a new tenant; the tenant id is not
/// known yet when these are collected.
#[derive(Debug, Clone)]
pub struct LeaseTerms {
    pub property_id: i32,
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    pub date_time_start: DateTime<Utc>,
    pub date_time_end: DateTime<Utc>,
}

/// Insert shape for a standalone lease.
#[derive(Debug, Clone)]
pub struct NewLease {
    pub name: Option<String>,
    pub property_id: i32,
    pub tenant_id: i32,
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    pub date_time_start: DateTime<Utc>,
    pub date_time_end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn lease(id: i32, start: DateTime<Utc>, end: DateTime<Utc>, created: DateTime<Utc>) -> Lease {
        Lease {
            id,
            name: None,
            property_id: 1,
            tenant_id: 1,
            unit_num: None,
            occupants: None,
            date_time_start: start,
            date_time_end: end,
            created_at: created,
            updated_at: created,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn interval_is_half_open() {
        let l = lease(1, at(2024, 1, 1), at(2024, 2, 1), at(2023, 12, 1));
        assert!(l.is_active_at(at(2024, 1, 1)));
        assert!(l.is_active_at(at(2024, 1, 31)));
        assert!(!l.is_active_at(at(2024, 2, 1)));
        assert!(!l.is_active_at(at(2023, 12, 31)));
    }

    #[test]
    fn expired_lease_is_not_selected() {
        let leases = vec![lease(1, at(2023, 1, 1), at(2024, 1, 1), at(2022, 12, 1))];
        assert!(active_lease(&leases, at(2024, 6, 1)).is_none());
    }

    #[test]
    fn containing_lease_is_selected() {
        let leases = vec![
            lease(1, at(2023, 1, 1), at(2024, 1, 1), at(2022, 12, 1)),
            lease(2, at(2024, 1, 1), at(2025, 1, 1), at(2023, 12, 1)),
        ];
        let found = active_lease(&leases, at(2024, 6, 1)).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn most_recently_created_wins_on_overlap() {
        let created_old = at(2023, 1, 1);
        let created_new = created_old + Duration::days(30);
        let leases = vec![
            lease(1, at(2024, 1, 1), at(2025, 1, 1), created_old),
            lease(2, at(2024, 3, 1), at(2024, 9, 1), created_new),
        ];
        let found = active_lease(&leases, at(2024, 6, 1)).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn equal_creation_breaks_tie_by_id() {
        let created = at(2023, 1, 1);
        let leases = vec![
            lease(5, at(2024, 1, 1), at(2025, 1, 1), created),
            lease(3, at(2024, 1, 1), at(2025, 1, 1), created),
        ];
        assert_eq!(active_lease(&leases, at(2024, 6, 1)).unwrap().id, 5);
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let l = lease(1, at(2024, 1, 1), at(2024, 2, 1), at(2023, 12, 1));
        assert!(!l.overlaps(at(2024, 2, 1), at(2024, 3, 1)));
        assert!(l.overlaps(at(2024, 1, 15), at(2024, 3, 1)));
        assert!(l.overlaps(at(2023, 12, 1), at(2024, 1, 2)));
    }
}
