use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::properties;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = properties)]
pub struct PropertyEntity {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}
