use sqlx::PgPool;

use crate::database::models::{CreatePaymentInput, Payment};

pub struct PaymentsRepository {
    pool: PgPool,
}

impl PaymentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        lease_id: i32,
        input: &CreatePaymentInput,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (lease_id, amount, date_paid, payment_type, notes, receipt_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(lease_id)
        .bind(input.amount)
        .bind(input.date_paid)
        .bind(input.payment_type)
        .bind(&input.notes)
        .bind(&input.receipt_url)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_lease_id(&self, lease_id: i32) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE lease_id = $1 ORDER BY date_paid DESC",
        )
        .bind(lease_id)
        .fetch_all(&self.pool)
        .await
    }
}
