use sqlx::{PgPool, QueryBuilder};

use crate::database::models::{CreateTenantInput, Tenant, UpdateTenantInput};

pub struct TenantsRepository {
    pool: PgPool,
}

impl TenantsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: &CreateTenantInput,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (owner_id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        input: &UpdateTenantInput,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE tenants SET updated_at = now()");
        if let Some(v) = &input.name {
            qb.push(", name = ").push_bind(v);
        }
        if let Some(v) = &input.email {
            qb.push(", email = ").push_bind(v);
        }
        if let Some(v) = &input.phone {
            qb.push(", phone = ").push_bind(v);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Tenant>()
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_id_and_owner_id(
        &self,
        id: i32,
        owner_id: i32,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_owner_id(&self, owner_id: i32) -> Result<Vec<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
