use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    entities::payments::InsertPaymentEntity,
    repositories::apartment_bookings::ApartmentBookingRepository,
    value_objects::{
        bookings::{BookApartmentModel, BookingOrder, BookingReceipt, UnitRef},
        enums::{payment_kinds::PaymentKind, payment_methods::PaymentMethod},
        payment_details::PaymentDetailsError,
        payments::COMPLETED_PAYMENT_STATUS,
    },
};

pub const FALLBACK_BOOKING_NOTE: &str = "Demo booking - unit is a fallback demo unit";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Amount paid must be greater than zero")]
    InvalidAmount,
    #[error("Only credit card and UPI payments are accepted")]
    InvalidMethod,
    #[error("{0}")]
    InvalidDetails(#[from] PaymentDetailsError),
    #[error("Unit id {0} is not a valid unit reference")]
    InvalidUnitId(String),
    #[error("Unit is not available for booking")]
    UnitUnavailable,
    #[error("Server error while processing apartment booking")]
    Internal(#[from] anyhow::Error),
}

impl BookingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BookingError::InvalidAmount
            | BookingError::InvalidMethod
            | BookingError::InvalidDetails(_)
            | BookingError::InvalidUnitId(_) => StatusCode::BAD_REQUEST,
            BookingError::UnitUnavailable => StatusCode::CONFLICT,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type BookingResult<T> = std::result::Result<T, BookingError>;

pub struct BookingUseCase<B>
where
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    booking_repo: Arc<B>,
}

impl<B> BookingUseCase<B>
where
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    pub fn new(booking_repo: Arc<B>) -> Self {
        Self { booking_repo }
    }

    /// Validates the booking request, then hands the whole set of writes
    /// to the booking repository as one atomic order. Nothing is written
    /// before validation passes.
    pub async fn book_apartment(&self, model: BookApartmentModel) -> BookingResult<BookingReceipt> {
        info!(
            user_id = model.user_id,
            property_id = model.property_id,
            unit_id = %model.unit_id,
            "bookings: apartment booking requested"
        );

        if model.amount_paid <= 0 {
            let err = BookingError::InvalidAmount;
            warn!(
                user_id = model.user_id,
                amount_paid = model.amount_paid,
                status = err.status_code().as_u16(),
                "bookings: non-positive amount"
            );
            return Err(err);
        }

        let method = PaymentMethod::from_str(&model.payment_method).ok_or_else(|| {
            let err = BookingError::InvalidMethod;
            warn!(
                user_id = model.user_id,
                payment_method = %model.payment_method,
                status = err.status_code().as_u16(),
                "bookings: unsupported payment method"
            );
            err
        })?;

        model.payment_details.validate(method).map_err(|err| {
            warn!(
                user_id = model.user_id,
                payment_method = %method,
                error = %err,
                "bookings: payment details rejected"
            );
            BookingError::InvalidDetails(err)
        })?;

        let unit = UnitRef::parse(&model.unit_id).ok_or_else(|| {
            let err = BookingError::InvalidUnitId(model.unit_id.clone());
            warn!(
                user_id = model.user_id,
                unit_id = %model.unit_id,
                status = err.status_code().as_u16(),
                "bookings: malformed unit id"
            );
            err
        })?;

        // Second-granularity reference; collisions are an accepted gap at
        // this write volume.
        let invoice_number = format!("APT-{}-{}", model.property_id, Utc::now().timestamp());

        let payment_details = serde_json::to_value(&model.payment_details)
            .map_err(|err| BookingError::Internal(err.into()))?;

        let notes = match unit {
            UnitRef::Fallback(_) => Some(FALLBACK_BOOKING_NOTE.to_string()),
            UnitRef::Real(_) => None,
        };

        let order = BookingOrder {
            payment: InsertPaymentEntity {
                user_id: model.user_id,
                property_id: model.property_id,
                kind: PaymentKind::Apartment.to_string(),
                total_price: Some(model.total_price.unwrap_or(model.amount_paid)),
                amount_paid: model.amount_paid,
                payment_method: method.to_string(),
                payment_details,
                status: COMPLETED_PAYMENT_STATUS.to_string(),
                payment_date: Utc::now(),
                invoice_number: None,
            },
            unit,
            notes,
            invoice_number: invoice_number.clone(),
        };

        let payment_id = self
            .booking_repo
            .book_unit(order)
            .await
            .map_err(|err| {
                error!(
                    user_id = model.user_id,
                    unit_id = %model.unit_id,
                    db_error = ?err,
                    "bookings: booking transaction failed"
                );
                BookingError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = BookingError::UnitUnavailable;
                warn!(
                    user_id = model.user_id,
                    unit_id = %model.unit_id,
                    status = err.status_code().as_u16(),
                    "bookings: unit already taken"
                );
                err
            })?;

        info!(
            payment_id,
            invoice_number = %invoice_number,
            "bookings: apartment booked"
        );

        Ok(BookingReceipt {
            payment_id,
            invoice_number,
        })
    }
}
