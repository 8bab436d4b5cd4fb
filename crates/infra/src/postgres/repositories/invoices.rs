use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        apartment_bookings::ApartmentBookingEntity, apartment_units::ApartmentUnitEntity,
        apartments::ApartmentEntity, payments::PaymentEntity, properties::PropertyEntity,
        users::UserEntity,
    },
    repositories::invoices::InvoiceRepository,
    schema::{apartment_bookings, apartment_units, apartments, payments, properties, users},
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn find_property_invoice_row(
        &self,
        payment_id: i32,
    ) -> Result<Option<(PaymentEntity, Option<PropertyEntity>, Option<UserEntity>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = payments::table
            .left_join(properties::table.on(payments::property_id.eq(properties::id)))
            .left_join(users::table.on(payments::user_id.eq(users::id)))
            .filter(payments::id.eq(payment_id))
            .select((
                PaymentEntity::as_select(),
                Option::<PropertyEntity>::as_select(),
                Option::<UserEntity>::as_select(),
            ))
            .first::<(PaymentEntity, Option<PropertyEntity>, Option<UserEntity>)>(&mut conn)
            .optional()?;

        Ok(row)
    }

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
    > {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = payments::table
            .inner_join(
                apartment_bookings::table.on(apartment_bookings::payment_id.eq(payments::id)),
            )
            .left_join(apartments::table.on(apartment_bookings::apartment_id.eq(apartments::id)))
            .left_join(
                apartment_units::table.on(apartment_bookings::unit_id.eq(apartment_units::id)),
            )
            .left_join(users::table.on(payments::user_id.eq(users::id)))
            .filter(payments::id.eq(payment_id))
            .select((
                PaymentEntity::as_select(),
                ApartmentBookingEntity::as_select(),
                Option::<ApartmentEntity>::as_select(),
                Option::<ApartmentUnitEntity>::as_select(),
                Option::<UserEntity>::as_select(),
            ))
            .first::<(
                PaymentEntity,
                ApartmentBookingEntity,
                Option<ApartmentEntity>,
                Option<ApartmentUnitEntity>,
                Option<UserEntity>,
            )>(&mut conn)
            .optional()?;

        Ok(row)
    }
}
