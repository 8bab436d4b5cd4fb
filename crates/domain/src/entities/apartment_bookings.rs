use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::apartment_bookings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = apartment_bookings)]
pub struct ApartmentBookingEntity {
    pub id: i32,
    pub user_id: i32,
    pub apartment_id: i32,
    pub unit_id: i32,
    pub payment_id: i32,
    pub booking_date: DateTime<Utc>,
    pub amount: i64,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = apartment_bookings)]
pub struct InsertApartmentBookingEntity {
    pub user_id: i32,
    pub apartment_id: i32,
    pub unit_id: i32,
    pub payment_id: i32,
    pub booking_date: DateTime<Utc>,
    pub amount: i64,
    pub status: String,
    pub notes: Option<String>,
}
