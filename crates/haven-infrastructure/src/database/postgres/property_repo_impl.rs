//! PostgreSQL property repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use haven_core::domain::{NewProperty, Property};
use haven_core::error::DomainError;
use haven_core::repositories::PropertyRepository;

use super::database_error;

pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    id: i32,
    name: String,
    address: String,
    city: String,
    state: String,
    zipcode: String,
    archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            zipcode: row.zipcode,
            archived: row.archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PROPERTY_COLUMNS: &str =
    "id, name, address, city, state, zipcode, archived, created_at, updated_at";

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError> {
        let row: Option<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding property by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        let rows: Vec<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {} FROM properties ORDER BY id",
            PROPERTY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing properties", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, property: &NewProperty) -> Result<Property, DomainError> {
        let row: PropertyRow = sqlx::query_as(&format!(
            "INSERT INTO properties (name, address, city, state, zipcode) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.zipcode)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("creating property", e))?;

        Ok(row.into())
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let row: PropertyRow = sqlx::query_as(&format!(
            "UPDATE properties SET \
                name = $2, address = $3, city = $4, state = $5, zipcode = $6, \
                archived = $7, updated_at = $8 \
             WHERE id = $1 RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(property.id)
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.zipcode)
        .bind(property.archived)
        .bind(property.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("updating property", e))?;

        Ok(row.into())
    }
}
