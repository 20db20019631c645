use sqlx::{PgPool, QueryBuilder};

use crate::database::models::{CreatePropertyInput, Property, UpdatePropertyInput};

pub struct PropertiesRepository {
    pool: PgPool,
}

impl PropertiesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: &CreatePropertyInput,
    ) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (owner_id, name, address, address2, city, state, zip_code, country, property_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.address2)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip_code)
        .bind(&input.country)
        .bind(input.property_type)
        .fetch_optional(&self.pool)
        .await
    }

    /// Partial update, scoped to the owner in the same statement.
    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        input: &UpdatePropertyInput,
    ) -> Result<Option<Property>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE properties SET updated_at = now()");
        if let Some(v) = &input.name {
            qb.push(", name = ").push_bind(v);
        }
        if let Some(v) = &input.address {
            qb.push(", address = ").push_bind(v);
        }
        if let Some(v) = &input.address2 {
            qb.push(", address2 = ").push_bind(v);
        }
        if let Some(v) = &input.city {
            qb.push(", city = ").push_bind(v);
        }
        if let Some(v) = &input.state {
            qb.push(", state = ").push_bind(v);
        }
        if let Some(v) = &input.zip_code {
            qb.push(", zip_code = ").push_bind(v);
        }
        if let Some(v) = &input.country {
            qb.push(", country = ").push_bind(v);
        }
        if let Some(v) = input.property_type {
            qb.push(", property_type = ").push_bind(v);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id)
            .push(" RETURNING *");

        qb.build_query_as::<Property>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Fetch only when the property belongs to the given owner.
    pub async fn check_owner(
        &self,
        id: i32,
        owner_id: i32,
    ) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_owner_id(&self, owner_id: i32) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
