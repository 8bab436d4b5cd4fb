use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::payments::PaymentEntity;
use crate::value_objects::payment_details::PaymentDetails;

/// Completion marker stamped by the booking flow. Standalone payments
/// carry whatever marker the caller recorded.
pub const COMPLETED_PAYMENT_STATUS: &str = "completed";

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentModel {
    pub user_id: i32,
    pub property_id: i32,
    pub total_price: Option<i64>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub payment_details: PaymentDetails,
    pub status: String,
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentModel {
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

impl From<PaymentEntity> for PaymentModel {
    fn from(value: PaymentEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            property_id: value.property_id,
            kind: value.kind,
            total_price: value.total_price,
            amount_paid: value.amount_paid,
            payment_method: value.payment_method,
            payment_details: value.payment_details,
            status: value.status,
            payment_date: value.payment_date,
            invoice_number: value.invoice_number,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSummary {
    pub full_property_price: i64,
    pub deposit_amount: i64,
    pub total_paid: i64,
    pub pending_amount: i64,
    pub percentage_paid: i64,
}

/// One row of the merged payment history: a payment of either family plus
/// the property or apartment context it was made against. Card and UPI
/// details are deliberately not part of this view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentHistoryModel {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    pub kind: String,
    pub total_price: Option<i64>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub status: String,
    pub payment_date: DateTime<Utc>,
    pub invoice_number: Option<String>,
    pub property_name: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub booking_id: Option<i32>,
    pub unit_number: Option<String>,
}
