use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::payments::InsertPaymentEntity;
use crate::value_objects::payment_details::PaymentDetails;

/// Marker on demo unit ids that are not backed by inventory rows.
pub const FALLBACK_UNIT_PREFIX: &str = "fallback-";

#[derive(Debug, Clone, Deserialize)]
pub struct BookApartmentModel {
    pub user_id: i32,
    pub property_id: i32,
    pub unit_id: String,
    pub total_price: Option<i64>,
    pub amount_paid: i64,
    pub payment_method: String,
    pub payment_details: PaymentDetails,
    pub property_name: Option<String>,
}

/// A unit reference from a booking request. Real units must exist in
/// inventory; fallback units are stored with the marker stripped and
/// skip the availability path entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRef {
    Real(i32),
    Fallback(i32),
}

impl UnitRef {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(stripped) = raw.strip_prefix(FALLBACK_UNIT_PREFIX) {
            return stripped.parse::<i32>().ok().map(UnitRef::Fallback);
        }
        raw.parse::<i32>().ok().map(UnitRef::Real)
    }
}

/// Everything the booking transaction writes, assembled up front so the
/// repository can run the whole thing atomically.
#[derive(Debug, Clone)]
pub struct BookingOrder {
    pub payment: InsertPaymentEntity,
    pub unit: UnitRef,
    pub notes: Option<String>,
    pub invoice_number: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingReceipt {
    pub payment_id: i32,
    pub invoice_number: String,
}

/// A booking joined with its apartment, unit and payment context, as
/// shown on the "my bookings" screen. Unit fields are absent for demo
/// bookings that never had an inventory row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookedApartmentModel {
    pub booking_id: i32,
    pub apartment_id: i32,
    pub unit_id: i32,
    pub payment_id: i32,
    pub booking_date: DateTime<Utc>,
    pub amount: i64,
    pub booking_status: String,
    pub notes: Option<String>,
    pub apartment_name: Option<String>,
    pub location: Option<String>,
    pub unit_number: Option<String>,
    pub floor_number: Option<i32>,
    pub price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<i32>,
    pub invoice_number: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_real_unit_ids() {
        assert_eq!(UnitRef::parse("42"), Some(UnitRef::Real(42)));
    }

    #[test]
    fn strips_fallback_marker() {
        assert_eq!(UnitRef::parse("fallback-7"), Some(UnitRef::Fallback(7)));
    }

    #[test]
    fn rejects_garbage_unit_ids() {
        assert_eq!(UnitRef::parse("unit-42"), None);
        assert_eq!(UnitRef::parse("fallback-abc"), None);
        assert_eq!(UnitRef::parse(""), None);
    }
}
