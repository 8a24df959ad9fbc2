pub mod listing;
pub mod session;
pub mod ticket;
pub mod validation;
