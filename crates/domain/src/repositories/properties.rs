use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::properties::PropertyEntity;

#[async_trait]
#[automock]
pub trait PropertyRepository {
    async fn find_by_id(&self, property_id: i32) -> Result<Option<PropertyEntity>>;
}
