use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{
    CreateLeaseInput, CreateUnitInput, Lease, Unit, UpdateUnitInput,
};
use crate::database::repositories::{LeasesRepository, PropertiesRepository, UnitsRepository};
use crate::error::ApiError;

pub struct UnitsService {
    repo: UnitsRepository,
    properties: PropertiesRepository,
    leases: LeasesRepository,
}

impl UnitsService {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            repo: UnitsRepository::new(pool.clone()),
            properties: PropertiesRepository::new(pool.clone()),
            leases: LeasesRepository::new(pool.clone()),
        }
    }

    pub async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Unit>, ApiError> {
        Ok(self.repo.find_by_owner_id(owner_id).await?)
    }

    pub async fn find_one(&self, id: i32, owner_id: i32) -> Result<Unit, ApiError> {
        let unit = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(unit, "Unit")
    }

    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        input: &UpdateUnitInput,
    ) -> Result<Unit, ApiError> {
        let unit = self.repo.find_by_id_and_owner_id(id, owner_id).await?;
        ensure_found(unit, "Unit")?;
        let updated = self.repo.update(id, input).await?;
        ensure_persisted(updated, "update unit")
    }

    /// Units of a property, gated on the property belonging to the caller.
    pub async fn find_all_for_property(
        &self,
        property_id: i32,
        owner_id: i32,
    ) -> Result<Vec<Unit>, ApiError> {
        let property = self.properties.check_owner(property_id, owner_id).await?;
        ensure_found(property, "Property")?;
        Ok(self.repo.find_by_property_id(property_id).await?)
    }

    pub async fn create(
        &self,
        property_id: i32,
        owner_id: i32,
        input: &CreateUnitInput,
    ) -> Result<Unit, ApiError> {
        let property = self.properties.check_owner(property_id, owner_id).await?;
        ensure_found(property, "Property")?;
        let created = self.repo.create(property_id, input).await?;
        ensure_persisted(created, "create unit")
    }

    pub async fn find_leases(&self, unit_id: i32, owner_id: i32) -> Result<Vec<Lease>, ApiError> {
        let unit = self.repo.find_by_id_and_owner_id(unit_id, owner_id).await?;
        ensure_found(unit, "Unit")?;
        Ok(self.leases.find_by_unit_id(unit_id).await?)
    }

    /// Create a lease under a unit. The unit must be owned and available:
    /// any lease whose end date has not yet passed blocks new ones.
    ///
    /// The availability check and the insert are separate statements; two
    /// concurrent requests can both pass the check. Accepted limitation.
    pub async fn create_lease(
        &self,
        unit_id: i32,
        owner_id: i32,
        input: &CreateLeaseInput,
    ) -> Result<Lease, ApiError> {
        let unit = self.repo.find_by_id_and_owner_id(unit_id, owner_id).await?;
        ensure_found(unit, "Unit")?;

        let today = Utc::now().date_naive();
        if self
            .leases
            .find_active_by_unit_id(unit_id, today)
            .await?
            .is_some()
        {
            return Err(ApiError::bad_request("Unit is not available"));
        }

        let created = self.leases.create(unit_id, input).await?;
        ensure_persisted(created, "create lease")
    }
}

/// A lease blocks the unit while `end_date >= today`.
pub fn lease_blocks_unit(end_date: NaiveDate, today: NaiveDate) -> bool {
    end_date >= today
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_window_is_inclusive_of_today() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        let next_year = NaiveDate::from_ymd_opt(2027, 2, 18).unwrap();

        assert!(lease_blocks_unit(today, today));
        assert!(lease_blocks_unit(next_year, today));
        assert!(!lease_blocks_unit(yesterday, today));
    }
}
