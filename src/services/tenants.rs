use sqlx::PgPool;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{CreateTenantInput, Lease, Tenant, UpdateTenantInput};
use crate::database::repositories::{LeasesRepository, TenantsRepository};
use crate::error::ApiError;

pub struct TenantsService {
    repo: TenantsRepository,
    leases: LeasesRepository,
}

impl TenantsService {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            repo: TenantsRepository::new(pool.clone()),
            leases: LeasesRepository::new(pool.clone()),
        }
    }

    pub async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Tenant>, ApiError> {
        Ok(self.repo.find_by_owner_id(owner_id).await?)
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: &CreateTenantInput,
    ) -> Result<Tenant, ApiError> {
        let created = self.repo.create(owner_id, input).await?;
        ensure_persisted(created, "create tenant")
    }

    pub async fn find_one(&self, id: i32, owner_id: i32) -> Result<Tenant, ApiError> {
        let tenant = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(tenant, "Tenant")
    }

    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        input: &UpdateTenantInput,
    ) -> Result<Tenant, ApiError> {
        let tenant = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(tenant, "Tenant")?;
        let updated = self.repo.update(id, input).await?;
        ensure_persisted(updated, "update tenant")
    }

    pub async fn find_leases(&self, id: i32, owner_id: i32) -> Result<Vec<Lease>, ApiError> {
        let tenant = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(tenant, "Tenant")?;
        Ok(self.leases.find_by_owner_and_tenant_id(owner_id, id).await?)
    }
}
