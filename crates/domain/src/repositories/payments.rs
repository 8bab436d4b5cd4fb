use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::payments::{InsertPaymentEntity, PaymentEntity};
use crate::value_objects::payments::PaymentHistoryModel;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    /// Persists one payment attempt. The store re-checks the
    /// method/details agreement so a record one layer rejects can never
    /// be written by another.
    async fn create_payment(&self, payment: InsertPaymentEntity) -> Result<i32>;

    async fn stamp_invoice_number(&self, payment_id: i32, invoice_number: &str) -> Result<()>;

    async fn find_by_id(&self, payment_id: i32) -> Result<Option<PaymentEntity>>;

    /// Property-family rows for one user+property pair, most recent
    /// first.
    async fn find_by_user_and_property(
        &self,
        user_id: i32,
        property_id: i32,
    ) -> Result<Vec<PaymentEntity>>;

    async fn find_all(&self) -> Result<Vec<PaymentEntity>>;

    /// Property-family rows for a user, most recent first.
    async fn find_property_payments_for_user(&self, user_id: i32) -> Result<Vec<PaymentEntity>>;

    /// Property-family history rows with their property context.
    async fn find_property_history_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentHistoryModel>>;

    /// Apartment-family history rows with their booking, apartment and
    /// unit context.
    async fn find_apartment_history_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentHistoryModel>>;
}
