pub mod agreements;
pub mod announcements;
pub mod apartments;
pub mod bookings;
pub mod payments;
pub mod stats;
pub mod tokens;
pub mod users;
