use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ensure_found, ensure_persisted};
use crate::database::models::{CreatePropertyImageInput, PropertyImage, UploadUrlInput};
use crate::database::repositories::{PropertiesRepository, PropertyImagesRepository};
use crate::error::ApiError;
use crate::storage::Storage;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrl {
    pub upload_url: String,
    pub key: String,
}

pub struct PropertyImagesService {
    repo: PropertyImagesRepository,
    properties: PropertiesRepository,
    storage: Arc<Storage>,
}

impl PropertyImagesService {
    pub fn new(pool: &PgPool, storage: Arc<Storage>) -> Self {
        Self {
            repo: PropertyImagesRepository::new(pool.clone()),
            properties: PropertiesRepository::new(pool.clone()),
            storage,
        }
    }

    async fn check_property(&self, property_id: i32, owner_id: i32) -> Result<(), ApiError> {
        let property = self.properties.check_owner(property_id, owner_id).await?;
        ensure_found(property, "Property")?;
        Ok(())
    }

    /// Issue a short-lived upload URL under `properties/{id}/{uuid}.{ext}`.
    pub async fn upload_url(
        &self,
        property_id: i32,
        owner_id: i32,
        input: &UploadUrlInput,
    ) -> Result<UploadUrl, ApiError> {
        self.check_property(property_id, owner_id).await?;

        let ext = input
            .file_name
            .rsplit('.')
            .next()
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let key = format!("properties/{property_id}/{}.{ext}", Uuid::new_v4());
        let upload_url = self
            .storage
            .presigned_upload_url(&key, &input.content_type)
            .await?;

        Ok(UploadUrl { upload_url, key })
    }

    /// Persist image rows after upload. Bare keys become public URLs;
    /// anything already absolute is stored as-is.
    pub async fn create(
        &self,
        property_id: i32,
        owner_id: i32,
        inputs: Vec<CreatePropertyImageInput>,
    ) -> Result<Vec<PropertyImage>, ApiError> {
        self.check_property(property_id, owner_id).await?;

        let inputs: Vec<CreatePropertyImageInput> = inputs
            .into_iter()
            .map(|mut input| {
                if !input.url.starts_with("http") {
                    input.url = self.storage.public_url(&input.url);
                }
                input
            })
            .collect();

        Ok(self.repo.create_many(property_id, &inputs).await?)
    }

    pub async fn find_all(
        &self,
        property_id: i32,
        owner_id: i32,
    ) -> Result<Vec<PropertyImage>, ApiError> {
        self.check_property(property_id, owner_id).await?;
        Ok(self.repo.find_by_property_id(property_id).await?)
    }

    /// Remove the storage object, then the row. A URL the key cannot be
    /// recovered from still removes the row.
    pub async fn delete(
        &self,
        image_id: i32,
        property_id: i32,
        owner_id: i32,
    ) -> Result<PropertyImage, ApiError> {
        self.check_property(property_id, owner_id).await?;

        let image = self.repo.find_by_id(image_id).await?;
        let image = ensure_found(
            image.filter(|i| i.property_id == property_id),
            "Property image",
        )?;

        if let Some(key) = self.storage.extract_key(&image.url) {
            self.storage.delete(&key).await?;
        }

        let deleted = self.repo.delete(image.id).await?;
        ensure_persisted(deleted, "delete property image")
    }
}
