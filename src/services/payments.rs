use sqlx::PgPool;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{CreatePaymentInput, Payment};
use crate::database::repositories::{LeasesRepository, PaymentsRepository};
use crate::error::ApiError;

pub struct PaymentsService {
    repo: PaymentsRepository,
    leases: LeasesRepository,
}

impl PaymentsService {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            repo: PaymentsRepository::new(pool.clone()),
            leases: LeasesRepository::new(pool.clone()),
        }
    }

    pub async fn find_all_for_lease(
        &self,
        lease_id: i32,
        owner_id: i32,
    ) -> Result<Vec<Payment>, ApiError> {
        let lease = self.leases.find_by_id_and_owner_id(lease_id, owner_id).await?;
        ensure_found(lease, "Lease")?;
        Ok(self.repo.find_by_lease_id(lease_id).await?)
    }

    pub async fn create(
        &self,
        lease_id: i32,
        owner_id: i32,
        input: &CreatePaymentInput,
    ) -> Result<Payment, ApiError> {
        let lease = self.leases.find_by_id_and_owner_id(lease_id, owner_id).await?;
        ensure_found(lease, "Lease")?;
        let created = self.repo.create(lease_id, input).await?;
        ensure_persisted(created, "create payment")
    }
}
