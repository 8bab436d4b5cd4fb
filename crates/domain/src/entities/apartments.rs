use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::apartments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = apartments)]
pub struct ApartmentEntity {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
