use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnitDetails {
    pub unit_number: String,
    pub floor_number: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: i32,
}

/// Normalized read-only projection of a payment, its owning property or
/// apartment, and the derived summary figures.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceModel {
    pub payment_id: i32,
    pub payment_kind: String,
    pub user_id: i32,
    pub property_id: i32,
    pub booking_id: Option<i32>,
    pub property_name: Option<String>,
    pub location: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub status: String,
    pub payment_date: DateTime<Utc>,
    pub invoice_number: Option<String>,
    pub full_property_price: i64,
    pub deposit_amount: i64,
    pub total_paid: i64,
    pub pending_amount: i64,
    pub percentage_paid: i64,
    pub unit_details: Option<UnitDetails>,
}
