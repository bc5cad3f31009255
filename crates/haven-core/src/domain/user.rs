//! User domain entity and role

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed role set with explicit discriminants. The numeric values are part
/// of the wire contract, but authorization decisions never compare them
/// directly; that lives in [`crate::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum Role {
    PropertyManager = 2,
    Staff = 3,
    Admin = 4,
}

impl Role {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            2 => Some(Role::PropertyManager),
            3 => Some(Role::Staff),
            4 => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.as_i16())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i16::deserialize(deserializer)?;
        Role::from_i16(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role value: {}", value)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Option<Role>,
    /// Salted one-way digest. The plaintext it came from is never stored.
    #[serde(skip)]
    pub hash_digest: String,
    pub archived: bool,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert shape; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hash_digest: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_discriminants_are_stable() {
        assert_eq!(Role::PropertyManager.as_i16(), 2);
        assert_eq!(Role::Staff.as_i16(), 3);
        assert_eq!(Role::Admin.as_i16(), 4);
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        assert_eq!(Role::from_i16(1), None);
        assert_eq!(Role::from_i16(5), None);
    }

    #[test]
    fn role_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "4");
        let role: Role = serde_json::from_str("2").unwrap();
        assert_eq!(role, Role::PropertyManager);
    }
}
