use sqlx::PgPool;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{Lease, UpdateLeaseInput};
use crate::database::repositories::LeasesRepository;
use crate::error::ApiError;

pub struct LeasesService {
    repo: LeasesRepository,
}

impl LeasesService {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            repo: LeasesRepository::new(pool.clone()),
        }
    }

    pub async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Lease>, ApiError> {
        Ok(self.repo.find_by_owner_id(owner_id).await?)
    }

    pub async fn find_one(&self, id: i32, owner_id: i32) -> Result<Lease, ApiError> {
        let lease = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(lease, "Lease")
    }

    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        input: &UpdateLeaseInput,
    ) -> Result<Lease, ApiError> {
        let lease = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(lease, "Lease")?;
        let updated = self.repo.update(id, input).await?;
        ensure_persisted(updated, "update lease")
    }
}
