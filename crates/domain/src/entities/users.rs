use diesel::prelude::*;

use crate::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
