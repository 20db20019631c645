use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};

use crate::database::models::{CreateLeaseInput, Lease, UpdateLeaseInput};

pub struct LeasesRepository {
    pool: PgPool,
}

impl LeasesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        unit_id: i32,
        input: &CreateLeaseInput,
    ) -> Result<Option<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            r#"
            INSERT INTO leases
                (unit_id, tenant_id, start_date, end_date, monthly_rent, security_deposit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(unit_id)
        .bind(input.tenant_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.monthly_rent)
        .bind(input.security_deposit)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        input: &UpdateLeaseInput,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE leases SET updated_at = now()");
        if let Some(v) = input.tenant_id {
            qb.push(", tenant_id = ").push_bind(v);
        }
        if let Some(v) = input.start_date {
            qb.push(", start_date = ").push_bind(v);
        }
        if let Some(v) = input.end_date {
            qb.push(", end_date = ").push_bind(v);
        }
        if let Some(v) = input.monthly_rent {
            qb.push(", monthly_rent = ").push_bind(v);
        }
        if let Some(v) = input.security_deposit {
            qb.push(", security_deposit = ").push_bind(v);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Lease>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Ownership resolves through unit and property.
    pub async fn find_by_id_and_owner_id(
        &self,
        id: i32,
        owner_id: i32,
    ) -> Result<Option<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            r#"
            SELECT l.*
            FROM leases l
            JOIN units u ON u.id = l.unit_id
            JOIN properties p ON p.id = u.property_id
            WHERE l.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_owner_id(&self, owner_id: i32) -> Result<Vec<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            r#"
            SELECT l.*
            FROM leases l
            JOIN units u ON u.id = l.unit_id
            JOIN properties p ON p.id = u.property_id
            WHERE p.owner_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_owner_and_tenant_id(
        &self,
        owner_id: i32,
        tenant_id: i32,
    ) -> Result<Vec<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            r#"
            SELECT l.*
            FROM leases l
            JOIN units u ON u.id = l.unit_id
            JOIN properties p ON p.id = u.property_id
            WHERE p.owner_id = $1 AND l.tenant_id = $2
            ORDER BY l.id
            "#,
        )
        .bind(owner_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_unit_id(&self, unit_id: i32) -> Result<Vec<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            "SELECT * FROM leases WHERE unit_id = $1 ORDER BY start_date DESC",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await
    }

    /// A lease still blocks the unit while its end date has not passed.
    pub async fn find_active_by_unit_id(
        &self,
        unit_id: i32,
        on: NaiveDate,
    ) -> Result<Option<Lease>, sqlx::Error> {
        sqlx::query_as::<_, Lease>(
            "SELECT * FROM leases WHERE unit_id = $1 AND end_date >= $2 LIMIT 1",
        )
        .bind(unit_id)
        .bind(on)
        .fetch_optional(&self.pool)
        .await
    }
}
