use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{apartment_units::ApartmentUnitEntity, apartments::ApartmentEntity},
    repositories::apartments::ApartmentRepository,
    schema::{apartment_units, apartments},
};

pub struct ApartmentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ApartmentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ApartmentRepository for ApartmentPostgres {
    async fn list_apartments(&self) -> Result<Vec<ApartmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = apartments::table
            .order(apartments::created_at.desc())
            .select(ApartmentEntity::as_select())
            .load::<ApartmentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, apartment_id: i32) -> Result<Option<ApartmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let apartment = apartments::table
            .find(apartment_id)
            .select(ApartmentEntity::as_select())
            .first::<ApartmentEntity>(&mut conn)
            .optional()?;

        Ok(apartment)
    }

    async fn list_units(&self, apartment_id: i32) -> Result<Vec<ApartmentUnitEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = apartment_units::table
            .filter(apartment_units::apartment_id.eq(apartment_id))
            .order((
                apartment_units::floor_number.asc(),
                apartment_units::unit_number.asc(),
            ))
            .select(ApartmentUnitEntity::as_select())
            .load::<ApartmentUnitEntity>(&mut conn)?;

        Ok(results)
    }
}
