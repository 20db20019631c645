use sqlx::{PgPool, QueryBuilder};

use crate::database::models::{CreatePropertyImageInput, PropertyImage};

pub struct PropertyImagesRepository {
    pool: PgPool,
}

impl PropertyImagesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        property_id: i32,
        input: &CreatePropertyImageInput,
    ) -> Result<Option<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            r#"
            INSERT INTO property_images (property_id, name, url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(&input.name)
        .bind(&input.url)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create_many(
        &self,
        property_id: i32,
        inputs: &[CreatePropertyImageInput],
    ) -> Result<Vec<PropertyImage>, sqlx::Error> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::new("INSERT INTO property_images (property_id, name, url) ");
        qb.push_values(inputs, |mut row, input| {
            row.push_bind(property_id)
                .push_bind(&input.name)
                .push_bind(&input.url);
        });
        qb.push(" RETURNING *");

        qb.build_query_as::<PropertyImage>()
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>("SELECT * FROM property_images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_property_id(
        &self,
        property_id: i32,
    ) -> Result<Vec<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            "SELECT * FROM property_images WHERE property_id = $1 ORDER BY created_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_property_ids(
        &self,
        property_ids: &[i32],
    ) -> Result<Vec<PropertyImage>, sqlx::Error> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, PropertyImage>(
            "SELECT * FROM property_images WHERE property_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(property_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// The one hard delete in the system.
    pub async fn delete(&self, id: i32) -> Result<Option<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            "DELETE FROM property_images WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
