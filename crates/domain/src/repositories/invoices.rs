use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::{
    apartment_bookings::ApartmentBookingEntity, apartment_units::ApartmentUnitEntity,
    apartments::ApartmentEntity, payments::PaymentEntity, properties::PropertyEntity,
    users::UserEntity,
};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    /// Property-family invoice row: the payment joined with its property
    /// and buyer. Joins are left joins; a missing property or user row
    /// must degrade the view, not drop it.
    async fn find_property_invoice_row(
        &self,
        payment_id: i32,
    ) -> Result<Option<(PaymentEntity, Option<PropertyEntity>, Option<UserEntity>)>>;

    /// Apartment-family invoice row: the payment joined with its booking
    /// and, where inventory rows exist, the apartment, unit and buyer.
    /// Demo bookings have no unit row.
    async fn find_apartment_invoice_row(
        &self,
        payment_id: i32,
    ) -> Result<
        Option<(
            PaymentEntity,
            ApartmentBookingEntity,
            Option<ApartmentEntity>,
            Option<ApartmentUnitEntity>,
            Option<UserEntity>,
        )>,
    >;
}
