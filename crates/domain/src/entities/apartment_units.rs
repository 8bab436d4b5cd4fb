use diesel::prelude::*;

use crate::schema::apartment_units;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = apartment_units)]
pub struct ApartmentUnitEntity {
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
