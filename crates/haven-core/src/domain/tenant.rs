//! Tenant domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lease::LeaseTerms;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert shape. Staff links and the optional initial lease travel with it
/// so the store can commit all three in one transaction.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub staff_ids: Vec<i32>,
    pub lease: Option<LeaseTerms>,
}
