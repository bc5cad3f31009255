//! Tenancy and lease service
//!
//! Tenant CRUD with staff links and an optional initial lease, lease CRUD
//! with the per-tenant overlap rule, and the property views that keep full
//! lease history separate from the active-tenant set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{
    active_lease, archive, Lease, NewLease, NewProperty, NewTenant, Property, Tenant,
};
use crate::error::DomainError;
use crate::repositories::{LeaseRepository, PropertyRepository, TenantRepository};

/// Tenant plus the relationships its JSON view needs.
#[derive(Debug, Clone)]
pub struct TenantDetails {
    pub tenant: Tenant,
    pub staff_ids: Vec<i32>,
    pub active_lease: Option<Lease>,
}

/// Lease plus both ends of its references, for the nested wire shape.
#[derive(Debug, Clone)]
pub struct LeaseDetails {
    pub lease: Lease,
    pub property: Property,
    pub tenant: Tenant,
}

/// Property plus its full lease history and the currently active tenants.
/// The two collections are deliberately distinct: `leases` is unfiltered
/// history, `tenants` only holders of a lease containing `as_of`.
#[derive(Debug, Clone)]
pub struct PropertyDetails {
    pub property: Property,
    pub leases: Vec<Lease>,
    pub tenants: Vec<TenantDetails>,
}

#[derive(Debug, Clone)]
pub struct UpdateTenant {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct LeaseChanges {
    pub name: Option<String>,
    pub property_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    pub date_time_start: Option<DateTime<Utc>>,
    pub date_time_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct PropertyChanges {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

pub struct TenancyService {
    tenants: Arc<dyn TenantRepository>,
    properties: Arc<dyn PropertyRepository>,
    leases: Arc<dyn LeaseRepository>,
}

impl TenancyService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        properties: Arc<dyn PropertyRepository>,
        leases: Arc<dyn LeaseRepository>,
    ) -> Self {
        Self {
            tenants,
            properties,
            leases,
        }
    }

    // ---- tenants ----

    pub async fn create_tenant(&self, new: NewTenant) -> Result<TenantDetails, DomainError> {
        if new.first_name.is_empty() || new.last_name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if let Some(terms) = &new.lease {
            if terms.date_time_end <= terms.date_time_start {
                return Err(DomainError::Validation(
                    "lease must end after it starts".into(),
                ));
            }
            if self
                .properties
                .find_by_id(terms.property_id)
                .await?
                .is_none()
            {
                return Err(DomainError::PropertyNotFound);
            }
        }

        let tenant = self.tenants.create(&new).await?;
        info!(tenant_id = tenant.id, "Tenant created");
        self.tenant_details(tenant, Utc::now()).await
    }

    pub async fn update_tenant(
        &self,
        id: i32,
        changes: UpdateTenant,
        staff_ids: Option<Vec<i32>>,
    ) -> Result<TenantDetails, DomainError> {
        let mut tenant = self
            .tenants
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TenantNotFound)?;

        tenant.first_name = changes.first_name;
        tenant.last_name = changes.last_name;
        tenant.phone = changes.phone;
        tenant.updated_at = Utc::now();

        let tenant = self.tenants.update(&tenant, staff_ids.as_deref()).await?;
        self.tenant_details(tenant, Utc::now()).await
    }

    pub async fn get_tenant(&self, id: i32) -> Result<TenantDetails, DomainError> {
        let tenant = self
            .tenants
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TenantNotFound)?;
        self.tenant_details(tenant, Utc::now()).await
    }

    pub async fn list_tenants(&self) -> Result<Vec<TenantDetails>, DomainError> {
        let mut details = Vec::new();
        for tenant in self.tenants.find_all().await? {
            details.push(self.tenant_details(tenant, Utc::now()).await?);
        }
        Ok(details)
    }

    pub async fn toggle_tenant_archived(&self, id: i32) -> Result<(Tenant, String), DomainError> {
        let mut tenant = self
            .tenants
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TenantNotFound)?;
        let toggle = archive::toggle_archived("Tenant", tenant.archived);
        tenant.archived = toggle.archived;
        tenant.updated_at = Utc::now();
        let tenant = self.tenants.update(&tenant, None).await?;
        info!(
            tenant_id = tenant.id,
            archived = tenant.archived,
            "Tenant archival toggled"
        );
        Ok((tenant, toggle.message))
    }

    async fn tenant_details(
        &self,
        tenant: Tenant,
        as_of: DateTime<Utc>,
    ) -> Result<TenantDetails, DomainError> {
        let staff_ids = self.tenants.staff_ids(tenant.id).await?;
        let leases = self.leases.find_by_tenant(tenant.id).await?;
        let active = active_lease(&leases, as_of).cloned();
        Ok(TenantDetails {
            tenant,
            staff_ids,
            active_lease: active,
        })
    }

    // ---- leases ----

    pub async fn create_lease(&self, new: NewLease) -> Result<Lease, DomainError> {
        if new.date_time_end <= new.date_time_start {
            return Err(DomainError::Validation(
                "lease must end after it starts".into(),
            ));
        }
        if self.tenants.find_by_id(new.tenant_id).await?.is_none() {
            return Err(DomainError::TenantNotFound);
        }
        if self.properties.find_by_id(new.property_id).await?.is_none() {
            return Err(DomainError::PropertyNotFound);
        }
        self.ensure_no_overlap(new.tenant_id, new.date_time_start, new.date_time_end, None)
            .await?;

        let lease = self.leases.create(&new).await?;
        info!(lease_id = lease.id, tenant_id = lease.tenant_id, "Lease created");
        Ok(lease)
    }

    pub async fn update_lease(
        &self,
        id: i32,
        changes: LeaseChanges,
    ) -> Result<LeaseDetails, DomainError> {
        let mut lease = self
            .leases
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LeaseNotFound)?;

        if let Some(tenant_id) = changes.tenant_id {
            if self.tenants.find_by_id(tenant_id).await?.is_none() {
                return Err(DomainError::TenantNotFound);
            }
            lease.tenant_id = tenant_id;
        }
        if let Some(property_id) = changes.property_id {
            if self.properties.find_by_id(property_id).await?.is_none() {
                return Err(DomainError::PropertyNotFound);
            }
            lease.property_id = property_id;
        }
        if changes.name.is_some() {
            lease.name = changes.name;
        }
        if changes.unit_num.is_some() {
            lease.unit_num = changes.unit_num;
        }
        if changes.occupants.is_some() {
            lease.occupants = changes.occupants;
        }
        if let Some(start) = changes.date_time_start {
            lease.date_time_start = start;
        }
        if let Some(end) = changes.date_time_end {
            lease.date_time_end = end;
        }
        if lease.date_time_end <= lease.date_time_start {
            return Err(DomainError::Validation(
                "lease must end after it starts".into(),
            ));
        }
        self.ensure_no_overlap(
            lease.tenant_id,
            lease.date_time_start,
            lease.date_time_end,
            Some(lease.id),
        )
        .await?;

        lease.updated_at = Utc::now();
        let lease = self.leases.update(&lease).await?;
        self.lease_details(lease).await
    }

    pub async fn delete_lease(&self, id: i32) -> Result<(), DomainError> {
        if !self.leases.delete(id).await? {
            return Err(DomainError::LeaseNotFound);
        }
        info!(lease_id = id, "Lease deleted");
        Ok(())
    }

    pub async fn get_lease(&self, id: i32) -> Result<LeaseDetails, DomainError> {
        let lease = self
            .leases
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LeaseNotFound)?;
        self.lease_details(lease).await
    }

    pub async fn list_leases(&self) -> Result<Vec<LeaseDetails>, DomainError> {
        let mut details = Vec::new();
        for lease in self.leases.find_all().await? {
            details.push(self.lease_details(lease).await?);
        }
        Ok(details)
    }

    /// Overlapping leases for one tenant are disallowed outright; the
    /// active-lease tie-break only covers data that predates this rule.
    async fn ensure_no_overlap(
        &self,
        tenant_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_lease_id: Option<i32>,
    ) -> Result<(), DomainError> {
        let existing = self.leases.find_by_tenant(tenant_id).await?;
        let conflict = existing
            .iter()
            .filter(|l| Some(l.id) != exclude_lease_id)
            .any(|l| l.overlaps(start, end));
        if conflict {
            return Err(DomainError::OverlappingLease);
        }
        Ok(())
    }

    async fn lease_details(&self, lease: Lease) -> Result<LeaseDetails, DomainError> {
        let property = self
            .properties
            .find_by_id(lease.property_id)
            .await?
            .ok_or(DomainError::PropertyNotFound)?;
        let tenant = self
            .tenants
            .find_by_id(lease.tenant_id)
            .await?
            .ok_or(DomainError::TenantNotFound)?;
        Ok(LeaseDetails {
            lease,
            property,
            tenant,
        })
    }

    // ---- properties ----

    pub async fn create_property(&self, new: NewProperty) -> Result<Property, DomainError> {
        if new.name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        let property = self.properties.create(&new).await?;
        info!(property_id = property.id, "Property created");
        Ok(property)
    }

    pub async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> Result<Property, DomainError> {
        let mut property = self
            .properties
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PropertyNotFound)?;
        property.name = changes.name;
        property.address = changes.address;
        property.city = changes.city;
        property.state = changes.state;
        property.zipcode = changes.zipcode;
        property.updated_at = Utc::now();
        self.properties.update(&property).await
    }

    pub async fn list_properties(&self) -> Result<Vec<PropertyDetails>, DomainError> {
        let mut details = Vec::new();
        for property in self.properties.find_all().await? {
            details.push(self.property_view(property, Utc::now()).await?);
        }
        Ok(details)
    }

    pub async fn property_details(
        &self,
        id: i32,
        as_of: DateTime<Utc>,
    ) -> Result<PropertyDetails, DomainError> {
        let property = self
            .properties
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PropertyNotFound)?;
        self.property_view(property, as_of).await
    }

    async fn property_view(
        &self,
        property: Property,
        as_of: DateTime<Utc>,
    ) -> Result<PropertyDetails, DomainError> {
        let leases = self.leases.find_by_property(property.id).await?;

        // Distinct tenants of active leases, in first-seen order.
        let mut tenant_ids: Vec<i32> = Vec::new();
        for lease in leases.iter().filter(|l| l.is_active_at(as_of)) {
            if !tenant_ids.contains(&lease.tenant_id) {
                tenant_ids.push(lease.tenant_id);
            }
        }

        let mut tenants = Vec::new();
        if !tenant_ids.is_empty() {
            let found = self.tenants.find_by_ids(&tenant_ids).await?;
            for tenant_id in tenant_ids {
                let Some(tenant) = found.iter().find(|t| t.id == tenant_id) else {
                    continue;
                };
                let their_leases: Vec<Lease> = leases
                    .iter()
                    .filter(|l| l.tenant_id == tenant_id)
                    .cloned()
                    .collect();
                let staff_ids = self.tenants.staff_ids(tenant_id).await?;
                tenants.push(TenantDetails {
                    tenant: tenant.clone(),
                    staff_ids,
                    active_lease: active_lease(&their_leases, as_of).cloned(),
                });
            }
        }

        Ok(PropertyDetails {
            property,
            leases,
            tenants,
        })
    }
}
