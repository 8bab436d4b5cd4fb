use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{apartment_units::ApartmentUnitEntity, apartments::ApartmentEntity};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApartmentModel {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ApartmentEntity> for ApartmentModel {
    fn from(value: ApartmentEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            location: value.location,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApartmentUnitModel {
    pub id: i32,
    pub apartment_id: i32,
    pub unit_number: String,
    pub floor_number: i32,
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: i32,
    pub status: String,
}

impl From<ApartmentUnitEntity> for ApartmentUnitModel {
    fn from(value: ApartmentUnitEntity) -> Self {
        Self {
            id: value.id,
            apartment_id: value.apartment_id,
            unit_number: value.unit_number,
            floor_number: value.floor_number,
            price: value.price,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            area: value.area,
            status: value.status,
        }
    }
}
