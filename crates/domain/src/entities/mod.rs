pub mod apartment_bookings;
pub mod apartment_units;
pub mod apartments;
pub mod payments;
pub mod properties;
pub mod users;
