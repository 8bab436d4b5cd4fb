use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::bookings::{BookedApartmentModel, BookingOrder};

#[async_trait]
#[automock]
pub trait ApartmentBookingRepository {
    /// Runs the whole booking as one transaction: insert the payment,
    /// re-check the unit under the row lock, insert the booking, flip
    /// the unit to booked and stamp the invoice number. Returns the new
    /// payment id, or `None` when the unit was not available, in which
    /// case every write, the payment row included, has been rolled back.
    async fn book_unit(&self, order: BookingOrder) -> Result<Option<i32>>;

    async fn list_user_bookings(&self, user_id: i32) -> Result<Vec<BookedApartmentModel>>;
}
