use sqlx::PgPool;

use crate::database::models::Owner;

pub struct OwnersRepository {
    pool: PgPool,
}

impl OwnersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the owner profile for a freshly registered `owner`-role user.
    pub async fn create(&self, user_id: &str) -> Result<Option<Owner>, sqlx::Error> {
        sqlx::query_as::<_, Owner>(
            "INSERT INTO owners (user_id) VALUES ($1) RETURNING *",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, sqlx::Error> {
        sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Owner>, sqlx::Error> {
        sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }
}
