use std::collections::HashMap;

use sqlx::PgPool;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{
    CreatePropertyInput, Property, PropertyWithRelations, UpdatePropertyInput,
};
use crate::database::repositories::{
    OwnersRepository, PropertiesRepository, PropertyImagesRepository, UnitsRepository,
};
use crate::error::ApiError;

pub struct PropertiesService {
    repo: PropertiesRepository,
    owners: OwnersRepository,
    images: PropertyImagesRepository,
    units: UnitsRepository,
}

impl PropertiesService {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            repo: PropertiesRepository::new(pool.clone()),
            owners: OwnersRepository::new(pool.clone()),
            images: PropertyImagesRepository::new(pool.clone()),
            units: UnitsRepository::new(pool.clone()),
        }
    }

    /// List the owner's properties with their images, units and owner
    /// profile attached.
    pub async fn find_all_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<PropertyWithRelations>, ApiError> {
        let properties = self.repo.find_by_owner_id(owner_id).await?;
        let ids: Vec<i32> = properties.iter().map(|p| p.id).collect();

        let owner = self.owners.find_by_id(owner_id).await?;
        let mut images_by_property: HashMap<i32, Vec<_>> = HashMap::new();
        for image in self.images.find_by_property_ids(&ids).await? {
            images_by_property
                .entry(image.property_id)
                .or_default()
                .push(image);
        }
        let mut units_by_property: HashMap<i32, Vec<_>> = HashMap::new();
        for unit in self.units.find_by_property_ids(&ids).await? {
            units_by_property
                .entry(unit.property_id)
                .or_default()
                .push(unit);
        }

        Ok(properties
            .into_iter()
            .map(|property| {
                let images = images_by_property.remove(&property.id).unwrap_or_default();
                let units = units_by_property.remove(&property.id).unwrap_or_default();
                PropertyWithRelations {
                    property,
                    owner: owner.clone(),
                    images,
                    units,
                }
            })
            .collect())
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: &CreatePropertyInput,
    ) -> Result<Property, ApiError> {
        let created = self.repo.create(owner_id, input).await?;
        ensure_persisted(created, "create property")
    }

    pub async fn find_one(&self, id: i32, owner_id: i32) -> Result<Property, ApiError> {
        let property = self.repo.check_owner(id, owner_id).await?;
        ensure_found(property, "Property")
    }

    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        input: &UpdatePropertyInput,
    ) -> Result<Property, ApiError> {
        // The update itself is owner-scoped; a missing row covers both
        // "never existed" and "not yours".
        let updated = self.repo.update(id, owner_id, input).await?;
        ensure_found(updated, "Property")
    }
}
