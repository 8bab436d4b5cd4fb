use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::{apartment_units::ApartmentUnitEntity, apartments::ApartmentEntity};

#[async_trait]
#[automock]
pub trait ApartmentRepository {
    async fn list_apartments(&self) -> Result<Vec<ApartmentEntity>>;

    async fn find_by_id(&self, apartment_id: i32) -> Result<Option<ApartmentEntity>>;

    async fn list_units(&self, apartment_id: i32) -> Result<Vec<ApartmentUnitEntity>>;
}
