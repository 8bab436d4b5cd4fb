use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::properties::PropertyEntity, repositories::properties::PropertyRepository,
    schema::properties,
};

pub struct PropertyPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PropertyPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PropertyRepository for PropertyPostgres {
    async fn find_by_id(&self, property_id: i32) -> Result<Option<PropertyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let property = properties::table
            .find(property_id)
            .select(PropertyEntity::as_select())
            .first::<PropertyEntity>(&mut conn)
            .optional()?;

        Ok(property)
    }
}
