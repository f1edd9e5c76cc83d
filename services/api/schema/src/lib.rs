//! sea-orm entities for the Guestline api service.

pub mod guests;
pub mod users;
