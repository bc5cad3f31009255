//! Wire shapes
//!
//! The REST surface keeps the original field casing (`firstName`,
//! `propertyID`, `unitNum`). Inside a property's JSON the lease history is
//! flat (ids only) while the standalone lease endpoints nest full objects
//! under the `*ID` keys.

use serde::Serialize;

use haven_core::domain::{Lease, Property, Role, Tenant, User};
use haven_core::services::{LeaseDetails, PropertyDetails, TenantDetails};
use haven_shared::time::format_date;

#[derive(Debug, Serialize)]
pub struct UserJson {
    pub id: i32,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Option<i16>,
    pub archived: bool,
    #[serde(rename = "lastActive")]
    pub last_active: String,
    pub created_at: String,
    pub updated_at: String,
}

impl UserJson {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role.map(Role::as_i16),
            archived: user.archived,
            last_active: format_date(user.last_active),
            created_at: format_date(user.created_at),
            updated_at: format_date(user.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TenantJson {
    pub id: i32,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    #[serde(rename = "propertyID")]
    pub property_id: Option<i32>,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "staffIDs")]
    pub staff_ids: Vec<i32>,
    pub archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TenantJson {
    /// Lease-derived fields come from the given lease (the active one for
    /// tenant views, the enclosing one when nested inside lease JSON).
    pub fn from_parts(tenant: &Tenant, staff_ids: Vec<i32>, lease: Option<&Lease>) -> Self {
        Self {
            id: tenant.id,
            first_name: tenant.first_name.clone(),
            last_name: tenant.last_name.clone(),
            phone: tenant.phone.clone(),
            property_id: lease.map(|l| l.property_id),
            unit_num: lease.and_then(|l| l.unit_num.clone()),
            occupants: lease.and_then(|l| l.occupants),
            staff_ids,
            archived: tenant.archived,
            created_at: format_date(tenant.created_at),
            updated_at: format_date(tenant.updated_at),
        }
    }

    pub fn from_details(details: &TenantDetails) -> Self {
        Self::from_parts(
            &details.tenant,
            details.staff_ids.clone(),
            details.active_lease.as_ref(),
        )
    }
}

/// Flat lease shape used inside property JSON; references stay ids.
#[derive(Debug, Serialize)]
pub struct LeaseSummaryJson {
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "propertyID")]
    pub property_id: i32,
    #[serde(rename = "tenantID")]
    pub tenant_id: i32,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "dateTimeStart")]
    pub date_time_start: String,
    #[serde(rename = "dateTimeEnd")]
    pub date_time_end: String,
    pub created_at: String,
    pub updated_at: String,
}

impl LeaseSummaryJson {
    pub fn from_lease(lease: &Lease) -> Self {
        Self {
            id: lease.id,
            name: lease.name.clone(),
            property_id: lease.property_id,
            tenant_id: lease.tenant_id,
            unit_num: lease.unit_num.clone(),
            occupants: lease.occupants,
            date_time_start: format_date(lease.date_time_start),
            date_time_end: format_date(lease.date_time_end),
            created_at: format_date(lease.created_at),
            updated_at: format_date(lease.updated_at),
        }
    }
}

/// Property shape without its collections, for nesting inside lease JSON.
#[derive(Debug, Serialize)]
pub struct PropertyInfoJson {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl PropertyInfoJson {
    pub fn from_property(property: &Property) -> Self {
        Self {
            id: property.id,
            name: property.name.clone(),
            address: property.address.clone(),
            city: property.city.clone(),
            state: property.state.clone(),
            zipcode: property.zipcode.clone(),
            archived: property.archived,
            created_at: format_date(property.created_at),
            updated_at: format_date(property.updated_at),
        }
    }
}

/// Full lease shape with both references expanded.
#[derive(Debug, Serialize)]
pub struct LeaseJson {
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "propertyID")]
    pub property: PropertyInfoJson,
    #[serde(rename = "tenantID")]
    pub tenant: TenantJson,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "dateTimeStart")]
    pub date_time_start: String,
    #[serde(rename = "dateTimeEnd")]
    pub date_time_end: String,
    pub created_at: String,
    pub updated_at: String,
}

impl LeaseJson {
    pub fn from_details(details: &LeaseDetails) -> Self {
        Self {
            id: details.lease.id,
            name: details.lease.name.clone(),
            property: PropertyInfoJson::from_property(&details.property),
            tenant: TenantJson::from_parts(&details.tenant, Vec::new(), Some(&details.lease)),
            unit_num: details.lease.unit_num.clone(),
            occupants: details.lease.occupants,
            date_time_start: format_date(details.lease.date_time_start),
            date_time_end: format_date(details.lease.date_time_end),
            created_at: format_date(details.lease.created_at),
            updated_at: format_date(details.lease.updated_at),
        }
    }
}

/// Property with its full lease history (`lease`) and the filtered
/// active-tenant view (`tenants`). The two stay logically distinct.
#[derive(Debug, Serialize)]
pub struct PropertyJson {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub archived: bool,
    pub lease: Vec<LeaseSummaryJson>,
    pub tenants: Vec<TenantJson>,
    pub created_at: String,
    pub updated_at: String,
}

impl PropertyJson {
    pub fn from_details(details: &PropertyDetails) -> Self {
        Self {
            id: details.property.id,
            name: details.property.name.clone(),
            address: details.property.address.clone(),
            city: details.property.city.clone(),
            state: details.property.state.clone(),
            zipcode: details.property.zipcode.clone(),
            archived: details.property.archived,
            lease: details
                .leases
                .iter()
                .map(LeaseSummaryJson::from_lease)
                .collect(),
            tenants: details.tenants.iter().map(TenantJson::from_details).collect(),
            created_at: format_date(details.property.created_at),
            updated_at: format_date(details.property.updated_at),
        }
    }
}
