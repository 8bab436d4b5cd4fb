use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    pub kind: String,
    pub total_price: Option<i64>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub payment_details: Value,
    pub status: String,
    pub payment_date: DateTime<Utc>,
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub user_id: i32,
    pub property_id: i32,
    pub kind: String,
    pub total_price: Option<i64>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub payment_details: Value,
    pub status: String,
    pub payment_date: DateTime<Utc>,
    pub invoice_number: Option<String>,
}
