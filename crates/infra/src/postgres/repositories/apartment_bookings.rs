use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        apartment_bookings::{ApartmentBookingEntity, InsertApartmentBookingEntity},
        apartment_units::ApartmentUnitEntity,
        apartments::ApartmentEntity,
        payments::PaymentEntity,
    },
    repositories::apartment_bookings::ApartmentBookingRepository,
    schema::{apartment_bookings, apartment_units, apartments, payments},
    value_objects::{
        bookings::{BookedApartmentModel, BookingOrder, UnitRef},
        enums::{
            booking_statuses::BookingStatus, payment_methods::PaymentMethod,
            unit_statuses::UnitStatus,
        },
        payment_details::PaymentDetails,
    },
};

/// Outcome of the booking transaction closure. Returning an error is what
/// makes diesel roll the whole transaction back, so the lost-race case is
/// an error variant here even though the repository reports it as `None`.
enum BookingTxError {
    UnitUnavailable,
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for BookingTxError {
    fn from(err: diesel::result::Error) -> Self {
        BookingTxError::Db(err)
    }
}

pub struct ApartmentBookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ApartmentBookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ApartmentBookingRepository for ApartmentBookingPostgres {
    async fn book_unit(&self, order: BookingOrder) -> Result<Option<i32>> {
        let BookingOrder {
            payment,
            unit,
            notes,
            invoice_number,
        } = order;

        // Same rules as the usecases; a record rejected there must not be
        // writable through the store either.
        let method = PaymentMethod::from_str(&payment.payment_method)
            .ok_or_else(|| anyhow::anyhow!("Only credit card and UPI payments are accepted"))?;
        let details: PaymentDetails = serde_json::from_value(payment.payment_details.clone())?;
        details.validate(method).map_err(anyhow::Error::new)?;

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<i32, BookingTxError, _>(|conn| {
            let payment_id = insert_into(payments::table)
                .values(&payment)
                .returning(payments::id)
                .get_result::<i32>(conn)?;

            let unit_id = match unit {
                // Demo units have no inventory row; the booking is
                // recorded with the marker already stripped and the
                // availability path is skipped entirely.
                UnitRef::Fallback(demo_id) => demo_id,
                UnitRef::Real(unit_id) => {
                    // Re-read under the transaction's write lock so two
                    // concurrent bookings of one unit cannot both pass
                    // the check.
                    let available = apartment_units::table
                        .filter(apartment_units::id.eq(unit_id))
                        .filter(apartment_units::status.eq(UnitStatus::Available.to_string()))
                        .select(apartment_units::id)
                        .for_update()
                        .first::<i32>(conn)
                        .optional()?;

                    if available.is_none() {
                        return Err(BookingTxError::UnitUnavailable);
                    }

                    update(apartment_units::table.filter(apartment_units::id.eq(unit_id)))
                        .set(apartment_units::status.eq(UnitStatus::Booked.to_string()))
                        .execute(conn)?;

                    unit_id
                }
            };

            let insert_booking = InsertApartmentBookingEntity {
                user_id: payment.user_id,
                apartment_id: payment.property_id,
                unit_id,
                payment_id,
                booking_date: Utc::now(),
                amount: payment.amount_paid,
                status: BookingStatus::Confirmed.to_string(),
                notes,
            };

            insert_into(apartment_bookings::table)
                .values(&insert_booking)
                .execute(conn)?;

            update(payments::table.filter(payments::id.eq(payment_id)))
                .set(payments::invoice_number.eq(Some(invoice_number)))
                .execute(conn)?;

            Ok(payment_id)
        });

        match result {
            Ok(payment_id) => Ok(Some(payment_id)),
            Err(BookingTxError::UnitUnavailable) => Ok(None),
            Err(BookingTxError::Db(err)) => Err(err.into()),
        }
    }

    async fn list_user_bookings(&self, user_id: i32) -> Result<Vec<BookedApartmentModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = apartment_bookings::table
            .left_join(apartments::table.on(apartment_bookings::apartment_id.eq(apartments::id)))
            .left_join(
                apartment_units::table.on(apartment_bookings::unit_id.eq(apartment_units::id)),
            )
            .left_join(payments::table.on(apartment_bookings::payment_id.eq(payments::id)))
            .filter(apartment_bookings::user_id.eq(user_id))
            .order(apartment_bookings::booking_date.desc())
            .select((
                ApartmentBookingEntity::as_select(),
                Option::<ApartmentEntity>::as_select(),
                Option::<ApartmentUnitEntity>::as_select(),
                Option::<PaymentEntity>::as_select(),
            ))
            .load::<(
                ApartmentBookingEntity,
                Option<ApartmentEntity>,
                Option<ApartmentUnitEntity>,
                Option<PaymentEntity>,
            )>(&mut conn)?;

        let bookings = rows
            .into_iter()
            .map(|(booking, apartment, booked_unit, payment)| BookedApartmentModel {
                booking_id: booking.id,
                apartment_id: booking.apartment_id,
                unit_id: booking.unit_id,
                payment_id: booking.payment_id,
                booking_date: booking.booking_date,
                amount: booking.amount,
                booking_status: booking.status,
                notes: booking.notes,
                apartment_name: apartment.as_ref().map(|a| a.name.clone()),
                location: apartment.as_ref().map(|a| a.location.clone()),
                unit_number: booked_unit.as_ref().map(|u| u.unit_number.clone()),
                floor_number: booked_unit.as_ref().map(|u| u.floor_number),
                price: booked_unit.as_ref().map(|u| u.price),
                bedrooms: booked_unit.as_ref().map(|u| u.bedrooms),
                bathrooms: booked_unit.as_ref().map(|u| u.bathrooms),
                area: booked_unit.as_ref().map(|u| u.area),
                invoice_number: payment.as_ref().and_then(|p| p.invoice_number.clone()),
                payment_method: payment.as_ref().map(|p| p.payment_method.clone()),
                payment_status: payment.as_ref().map(|p| p.status.clone()),
            })
            .collect();

        Ok(bookings)
    }
}
