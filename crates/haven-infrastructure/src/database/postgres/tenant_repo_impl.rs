//! PostgreSQL tenant repository
//!
//! Tenant creation and update are transactional: the tenant row, its staff
//! links, and the optional initial lease commit together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use haven_core::domain::{NewTenant, Tenant};
use haven_core::error::DomainError;
use haven_core::repositories::TenantRepository;

use super::database_error;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_staff_links(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: i32,
        staff_ids: &[i32],
    ) -> Result<(), sqlx::Error> {
        for staff_id in staff_ids {
            sqlx::query(
                "INSERT INTO tenant_staff (tenant_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(tenant_id)
            .bind(staff_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct TenantRow {
    id: i32,
    first_name: String,
    last_name: String,
    phone: String,
    archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            archived: row.archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TENANT_COLUMNS: &str = "id, first_name, last_name, phone, archived, created_at, updated_at";

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tenants WHERE id = $1",
            TENANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding tenant by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tenants ORDER BY id",
            TENANT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing tenants", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tenants WHERE id = ANY($1) ORDER BY id",
            TENANT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding tenants by ids", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, tenant: &NewTenant) -> Result<Tenant, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting tenant transaction", e))?;

        let row: TenantRow = sqlx::query_as(&format!(
            "INSERT INTO tenants (first_name, last_name, phone) \
             VALUES ($1, $2, $3) RETURNING {}",
            TENANT_COLUMNS
        ))
        .bind(&tenant.first_name)
        .bind(&tenant.last_name)
        .bind(&tenant.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| database_error("creating tenant", e))?;

        Self::insert_staff_links(&mut tx, row.id, &tenant.staff_ids)
            .await
            .map_err(|e| database_error("linking tenant staff", e))?;

        if let Some(terms) = &tenant.lease {
            sqlx::query(
                "INSERT INTO leases \
                    (property_id, tenant_id, unit_num, occupants, date_time_start, date_time_end) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(terms.property_id)
            .bind(row.id)
            .bind(&terms.unit_num)
            .bind(terms.occupants)
            .bind(terms.date_time_start)
            .bind(terms.date_time_end)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("creating initial lease", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("committing tenant transaction", e))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        tenant: &Tenant,
        staff_ids: Option<&[i32]>,
    ) -> Result<Tenant, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting tenant transaction", e))?;

        let row: TenantRow = sqlx::query_as(&format!(
            "UPDATE tenants SET \
                first_name = $2, last_name = $3, phone = $4, archived = $5, updated_at = $6 \
             WHERE id = $1 RETURNING {}",
            TENANT_COLUMNS
        ))
        .bind(tenant.id)
        .bind(&tenant.first_name)
        .bind(&tenant.last_name)
        .bind(&tenant.phone)
        .bind(tenant.archived)
        .bind(tenant.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| database_error("updating tenant", e))?;

        if let Some(staff_ids) = staff_ids {
            sqlx::query("DELETE FROM tenant_staff WHERE tenant_id = $1")
                .bind(tenant.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| database_error("clearing tenant staff", e))?;
            Self::insert_staff_links(&mut tx, tenant.id, staff_ids)
                .await
                .map_err(|e| database_error("linking tenant staff", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("committing tenant transaction", e))?;

        Ok(row.into())
    }

    async fn staff_ids(&self, tenant_id: i32) -> Result<Vec<i32>, DomainError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT user_id FROM tenant_staff WHERE tenant_id = $1 ORDER BY user_id",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing tenant staff", e))?;

        Ok(ids)
    }
}
