pub mod booking_statuses;
pub mod payment_kinds;
pub mod payment_methods;
pub mod unit_statuses;
