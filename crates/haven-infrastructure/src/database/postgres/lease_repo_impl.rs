//! PostgreSQL lease repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use haven_core::domain::{Lease, NewLease};
use haven_core::error::DomainError;
use haven_core::repositories::LeaseRepository;

use super::database_error;

pub struct PgLeaseRepository {
    pool: PgPool,
}

impl PgLeaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeaseRow {
    id: i32,
    name: Option<String>,
    property_id: i32,
    tenant_id: i32,
    unit_num: Option<String>,
    occupants: Option<i32>,
    date_time_start: DateTime<Utc>,
    date_time_end: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LeaseRow> for Lease {
    fn from(row: LeaseRow) -> Self {
        Lease {
            id: row.id,
            name: row.name,
            property_id: row.property_id,
            tenant_id: row.tenant_id,
            unit_num: row.unit_num,
            occupants: row.occupants,
            date_time_start: row.date_time_start,
            date_time_end: row.date_time_end,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const LEASE_COLUMNS: &str = "id, name, property_id, tenant_id, unit_num, occupants, \
     date_time_start, date_time_end, created_at, updated_at";

#[async_trait]
impl LeaseRepository for PgLeaseRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lease>, DomainError> {
        let row: Option<LeaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM leases WHERE id = $1",
            LEASE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding lease by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Lease>, DomainError> {
        let rows: Vec<LeaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM leases ORDER BY id",
            LEASE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing leases", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_property(&self, property_id: i32) -> Result<Vec<Lease>, DomainError> {
        let rows: Vec<LeaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM leases WHERE property_id = $1 ORDER BY id",
            LEASE_COLUMNS
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding leases by property", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_tenant(&self, tenant_id: i32) -> Result<Vec<Lease>, DomainError> {
        let rows: Vec<LeaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM leases WHERE tenant_id = $1 ORDER BY id",
            LEASE_COLUMNS
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding leases by tenant", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, lease: &NewLease) -> Result<Lease, DomainError> {
        let row: LeaseRow = sqlx::query_as(&format!(
            "INSERT INTO leases \
                (name, property_id, tenant_id, unit_num, occupants, \
                 date_time_start, date_time_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            LEASE_COLUMNS
        ))
        .bind(&lease.name)
        .bind(lease.property_id)
        .bind(lease.tenant_id)
        .bind(&lease.unit_num)
        .bind(lease.occupants)
        .bind(lease.date_time_start)
        .bind(lease.date_time_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("creating lease", e))?;

        Ok(row.into())
    }

    async fn update(&self, lease: &Lease) -> Result<Lease, DomainError> {
        let row: LeaseRow = sqlx::query_as(&format!(
            "UPDATE leases SET \
                name = $2, property_id = $3, tenant_id = $4, unit_num = $5, \
                occupants = $6, date_time_start = $7, date_time_end = $8, updated_at = $9 \
             WHERE id = $1 RETURNING {}",
            LEASE_COLUMNS
        ))
        .bind(lease.id)
        .bind(&lease.name)
        .bind(lease.property_id)
        .bind(lease.tenant_id)
        .bind(&lease.unit_num)
        .bind(lease.occupants)
        .bind(lease.date_time_start)
        .bind(lease.date_time_end)
        .bind(lease.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("updating lease", e))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM leases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting lease", e))?;

        Ok(result.rows_affected() > 0)
    }
}
