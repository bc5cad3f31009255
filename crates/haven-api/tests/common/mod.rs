//! In-memory repository fakes and request helpers for driving the real
//! router in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use haven_api::{router, AppState};
use haven_core::domain::{
    Lease, NewLease, NewProperty, NewTenant, NewUser, Property, Role, Tenant, User,
};
use haven_core::error::DomainError;
use haven_core::repositories::{
    LeaseRepository, PropertyRepository, TenantRepository, UserRepository,
};
use haven_core::services::{IdentityService, TenancyService};
use haven_security::{PasswordService, TokenService};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "correct-horse";

#[derive(Default)]
pub struct InMemoryStore {
    pub users: Mutex<Vec<User>>,
    pub tenants: Mutex<Vec<Tenant>>,
    pub properties: Mutex<Vec<Property>>,
    pub leases: Mutex<Vec<Lease>>,
    pub staff: Mutex<HashMap<i32, Vec<i32>>>,
    next_id: AtomicI32,
}

impl InMemoryStore {
    pub fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn passwords() -> PasswordService {
        PasswordService::new(4)
    }

    pub fn insert_user(&self, email: &str, role: Option<Role>) -> User {
        let now = Utc::now();
        let user = User {
            id: self.next_id(),
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: "555-867-5309".to_string(),
            role,
            hash_digest: Self::passwords().hash(TEST_PASSWORD).unwrap(),
            archived: false,
            last_active: now,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn insert_tenant(&self, first_name: &str) -> Tenant {
        let now = Utc::now();
        let tenant = Tenant {
            id: self.next_id(),
            first_name: first_name.to_string(),
            last_name: "McRenter".to_string(),
            phone: "555-555-5555".to_string(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        self.tenants.lock().unwrap().push(tenant.clone());
        tenant
    }

    pub fn insert_property(&self, name: &str) -> Property {
        let now = Utc::now();
        let property = Property {
            id: self.next_id(),
            name: name.to_string(),
            address: "1 Meerkat Way".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zipcode: "97201".to_string(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        self.properties.lock().unwrap().push(property.clone());
        property
    }

    pub fn insert_lease(
        &self,
        property_id: i32,
        tenant_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Lease {
        let now = Utc::now();
        let lease = Lease {
            id: self.next_id(),
            name: None,
            property_id,
            tenant_id,
            unit_num: Some("413".to_string()),
            occupants: Some(3),
            date_time_start: start,
            date_time_end: end,
            created_at: now,
            updated_at: now,
        };
        self.leases.lock().unwrap().push(lease.clone());
        lease
    }
}

pub struct InMemoryUserRepo(pub Arc<InMemoryStore>);

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.0.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.0.users.lock().unwrap().clone())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == Some(role))
            .cloned()
            .collect())
    }

    async fn find_recent_by_role(&self, role: Role, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == Some(role))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn find_by_role_and_name(
        &self,
        role: Role,
        text: &str,
    ) -> Result<Vec<User>, DomainError> {
        let needle = text.to_lowercase();
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.role == Some(role)
                    && (u.first_name.to_lowercase().contains(&needle)
                        || u.last_name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn find_unassigned(&self) -> Result<Vec<User>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role.is_none() && !u.archived)
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.0.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(DomainError::EmailAlreadyExists(new_user.email.clone()));
        }
        let now = Utc::now();
        let user = User {
            id: self.0.next_id(),
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            phone: new_user.phone.clone(),
            role: new_user.role,
            hash_digest: new_user.hash_digest.clone(),
            archived: false,
            last_active: now,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.0.users.lock().unwrap();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(DomainError::UserNotFound)?;
        *existing = user.clone();
        Ok(user.clone())
    }

    async fn touch_last_active(&self, id: i32, at: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(user) = self.0.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_active = at;
        }
        Ok(())
    }
}

pub struct InMemoryTenantRepo(pub Arc<InMemoryStore>);

#[async_trait]
impl TenantRepository for InMemoryTenantRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tenant>, DomainError> {
        Ok(self
            .0
            .tenants
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError> {
        Ok(self.0.tenants.lock().unwrap().clone())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tenant>, DomainError> {
        Ok(self
            .0
            .tenants
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create(&self, new_tenant: &NewTenant) -> Result<Tenant, DomainError> {
        let now = Utc::now();
        let tenant = Tenant {
            id: self.0.next_id(),
            first_name: new_tenant.first_name.clone(),
            last_name: new_tenant.last_name.clone(),
            phone: new_tenant.phone.clone(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        self.0.tenants.lock().unwrap().push(tenant.clone());
        self.0
            .staff
            .lock()
            .unwrap()
            .insert(tenant.id, new_tenant.staff_ids.clone());
        if let Some(terms) = &new_tenant.lease {
            self.0.insert_lease(
                terms.property_id,
                tenant.id,
                terms.date_time_start,
                terms.date_time_end,
            );
        }
        Ok(tenant)
    }

    async fn update(
        &self,
        tenant: &Tenant,
        staff_ids: Option<&[i32]>,
    ) -> Result<Tenant, DomainError> {
        let mut tenants = self.0.tenants.lock().unwrap();
        let existing = tenants
            .iter_mut()
            .find(|t| t.id == tenant.id)
            .ok_or(DomainError::TenantNotFound)?;
        *existing = tenant.clone();
        if let Some(staff_ids) = staff_ids {
            self.0
                .staff
                .lock()
                .unwrap()
                .insert(tenant.id, staff_ids.to_vec());
        }
        Ok(tenant.clone())
    }

    async fn staff_ids(&self, tenant_id: i32) -> Result<Vec<i32>, DomainError> {
        Ok(self
            .0
            .staff
            .lock()
            .unwrap()
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct InMemoryPropertyRepo(pub Arc<InMemoryStore>);

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError> {
        Ok(self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        Ok(self.0.properties.lock().unwrap().clone())
    }

    async fn create(&self, new_property: &NewProperty) -> Result<Property, DomainError> {
        let now = Utc::now();
        let property = Property {
            id: self.0.next_id(),
            name: new_property.name.clone(),
            address: new_property.address.clone(),
            city: new_property.city.clone(),
            state: new_property.state.clone(),
            zipcode: new_property.zipcode.clone(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        self.0.properties.lock().unwrap().push(property.clone());
        Ok(property)
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let mut properties = self.0.properties.lock().unwrap();
        let existing = properties
            .iter_mut()
            .find(|p| p.id == property.id)
            .ok_or(DomainError::PropertyNotFound)?;
        *existing = property.clone();
        Ok(property.clone())
    }
}

pub struct InMemoryLeaseRepo(pub Arc<InMemoryStore>);

#[async_trait]
impl LeaseRepository for InMemoryLeaseRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lease>, DomainError> {
        Ok(self
            .0
            .leases
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Lease>, DomainError> {
        Ok(self.0.leases.lock().unwrap().clone())
    }

    async fn find_by_property(&self, property_id: i32) -> Result<Vec<Lease>, DomainError> {
        Ok(self
            .0
            .leases
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.property_id == property_id)
            .cloned()
            .collect())
    }

    async fn find_by_tenant(&self, tenant_id: i32) -> Result<Vec<Lease>, DomainError> {
        Ok(self
            .0
            .leases
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new_lease: &NewLease) -> Result<Lease, DomainError> {
        let now = Utc::now();
        let lease = Lease {
            id: self.0.next_id(),
            name: new_lease.name.clone(),
            property_id: new_lease.property_id,
            tenant_id: new_lease.tenant_id,
            unit_num: new_lease.unit_num.clone(),
            occupants: new_lease.occupants,
            date_time_start: new_lease.date_time_start,
            date_time_end: new_lease.date_time_end,
            created_at: now,
            updated_at: now,
        };
        self.0.leases.lock().unwrap().push(lease.clone());
        Ok(lease)
    }

    async fn update(&self, lease: &Lease) -> Result<Lease, DomainError> {
        let mut leases = self.0.leases.lock().unwrap();
        let existing = leases
            .iter_mut()
            .find(|l| l.id == lease.id)
            .ok_or(DomainError::LeaseNotFound)?;
        *existing = lease.clone();
        Ok(lease.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut leases = self.0.leases.lock().unwrap();
        let before = leases.len();
        leases.retain(|l| l.id != id);
        Ok(leases.len() < before)
    }
}

pub fn tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(TEST_SECRET, 3600, 600))
}

pub fn test_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let tokens = tokens();

    let state = AppState {
        identity: Arc::new(IdentityService::new(
            Arc::new(InMemoryUserRepo(store.clone())),
            InMemoryStore::passwords(),
            tokens.clone(),
        )),
        tenancy: Arc::new(TenancyService::new(
            Arc::new(InMemoryTenantRepo(store.clone())),
            Arc::new(InMemoryPropertyRepo(store.clone())),
            Arc::new(InMemoryLeaseRepo(store.clone())),
        )),
        tokens,
    };

    (router(state), store)
}

pub fn token_for(user: &User) -> String {
    tokens().generate_access_token(user.id).unwrap()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
