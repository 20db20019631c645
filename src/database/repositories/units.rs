use sqlx::{PgPool, QueryBuilder};

use crate::database::models::{CreateUnitInput, Unit, UpdateUnitInput};

pub struct UnitsRepository {
    pool: PgPool,
}

impl UnitsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        property_id: i32,
        input: &CreateUnitInput,
    ) -> Result<Option<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO units (property_id, unit_number, monthly_rent)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(input.unit_number)
        .bind(input.monthly_rent)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        input: &UpdateUnitInput,
    ) -> Result<Option<Unit>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE units SET updated_at = now()");
        if let Some(v) = input.unit_number {
            qb.push(", unit_number = ").push_bind(v);
        }
        if let Some(v) = input.monthly_rent {
            qb.push(", monthly_rent = ").push_bind(v);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Unit>().fetch_optional(&self.pool).await
    }

    pub async fn find_by_property_id(&self, property_id: i32) -> Result<Vec<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE property_id = $1 ORDER BY unit_number",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_property_ids(
        &self,
        property_ids: &[i32],
    ) -> Result<Vec<Unit>, sqlx::Error> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE property_id = ANY($1) ORDER BY property_id, unit_number",
        )
        .bind(property_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Ownership resolves through the parent property.
    pub async fn find_by_id_and_owner_id(
        &self,
        id: i32,
        owner_id: i32,
    ) -> Result<Option<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            r#"
            SELECT u.*
            FROM units u
            JOIN properties p ON p.id = u.property_id
            WHERE u.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_owner_id(&self, owner_id: i32) -> Result<Vec<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            r#"
            SELECT u.*
            FROM units u
            JOIN properties p ON p.id = u.property_id
            WHERE p.owner_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
