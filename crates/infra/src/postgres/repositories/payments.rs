use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        apartment_bookings::ApartmentBookingEntity, apartment_units::ApartmentUnitEntity,
        apartments::ApartmentEntity, payments::{InsertPaymentEntity, PaymentEntity},
        properties::PropertyEntity,
    },
    repositories::payments::PaymentRepository,
    schema::{apartment_bookings, apartment_units, apartments, payments, properties},
    value_objects::{
        enums::{payment_kinds::PaymentKind, payment_methods::PaymentMethod},
        payment_details::PaymentDetails,
        payments::PaymentHistoryModel,
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn property_history_row(
        (payment, property): (PaymentEntity, Option<PropertyEntity>),
    ) -> PaymentHistoryModel {
        PaymentHistoryModel {
            id: payment.id,
            user_id: payment.user_id,
            property_id: payment.property_id,
            kind: payment.kind,
            total_price: payment.total_price,
            amount_paid: payment.amount_paid,
            payment_method: payment.payment_method,
            status: payment.status,
            payment_date: payment.payment_date,
            invoice_number: payment.invoice_number,
            property_name: property.as_ref().map(|p| p.name.clone()),
            location: property.as_ref().map(|p| p.location.clone()),
            price: property.as_ref().map(|p| p.price),
            booking_id: None,
            unit_number: None,
        }
    }

    fn apartment_history_row(
        (payment, booking, apartment, unit): (
            PaymentEntity,
            ApartmentBookingEntity,
            Option<ApartmentEntity>,
            Option<ApartmentUnitEntity>,
        ),
    ) -> PaymentHistoryModel {
        PaymentHistoryModel {
            id: payment.id,
            user_id: payment.user_id,
            property_id: payment.property_id,
            kind: payment.kind,
            total_price: payment.total_price,
            amount_paid: payment.amount_paid,
            payment_method: payment.payment_method,
            status: payment.status,
            payment_date: payment.payment_date,
            invoice_number: payment.invoice_number,
            property_name: apartment.as_ref().map(|a| a.name.clone()),
            location: apartment.as_ref().map(|a| a.location.clone()),
            price: unit.as_ref().map(|u| u.price),
            booking_id: Some(booking.id),
            unit_number: unit.as_ref().map(|u| u.unit_number.clone()),
        }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn create_payment(&self, payment: InsertPaymentEntity) -> Result<i32> {
        // Same rules as the usecases; a record rejected there must not be
        // writable through the store either.
        let method = PaymentMethod::from_str(&payment.payment_method)
            .ok_or_else(|| anyhow::anyhow!("Only credit card and UPI payments are accepted"))?;
        let details: PaymentDetails = serde_json::from_value(payment.payment_details.clone())?;
        details.validate(method).map_err(anyhow::Error::new)?;

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = insert_into(payments::table)
            .values(&payment)
            .returning(payments::id)
            .get_result::<i32>(&mut conn)?;

        Ok(payment_id)
    }

    async fn stamp_invoice_number(&self, payment_id: i32, invoice_number: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(payments::table.filter(payments::id.eq(payment_id)))
            .set(payments::invoice_number.eq(Some(invoice_number.to_string())))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_id(&self, payment_id: i32) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .find(payment_id)
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn find_by_user_and_property(
        &self,
        user_id: i32,
        property_id: i32,
    ) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .filter(payments::user_id.eq(user_id))
            .filter(payments::property_id.eq(property_id))
            .filter(payments::kind.eq(PaymentKind::Property.to_string()))
            .order(payments::payment_date.desc())
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_all(&self) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .order(payments::payment_date.desc())
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_property_payments_for_user(&self, user_id: i32) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payments::table
            .filter(payments::user_id.eq(user_id))
            .filter(payments::kind.eq(PaymentKind::Property.to_string()))
            .order(payments::payment_date.desc())
            .select(PaymentEntity::as_select())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_property_history_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentHistoryModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .left_join(properties::table.on(payments::property_id.eq(properties::id)))
            .filter(payments::user_id.eq(user_id))
            .filter(payments::kind.eq(PaymentKind::Property.to_string()))
            .select((
                PaymentEntity::as_select(),
                Option::<PropertyEntity>::as_select(),
            ))
            .load::<(PaymentEntity, Option<PropertyEntity>)>(&mut conn)?;

        Ok(rows.into_iter().map(Self::property_history_row).collect())
    }

    async fn find_apartment_history_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentHistoryModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .inner_join(
                apartment_bookings::table.on(apartment_bookings::payment_id.eq(payments::id)),
            )
            .left_join(apartments::table.on(apartment_bookings::apartment_id.eq(apartments::id)))
            .left_join(
                apartment_units::table.on(apartment_bookings::unit_id.eq(apartment_units::id)),
            )
            .filter(payments::user_id.eq(user_id))
            .select((
                PaymentEntity::as_select(),
                ApartmentBookingEntity::as_select(),
                Option::<ApartmentEntity>::as_select(),
                Option::<ApartmentUnitEntity>::as_select(),
            ))
            .load::<(
                PaymentEntity,
                ApartmentBookingEntity,
                Option<ApartmentEntity>,
                Option<ApartmentUnitEntity>,
            )>(&mut conn)?;

        Ok(rows.into_iter().map(Self::apartment_history_row).collect())
    }
}
