pub mod access;
pub mod edit_session;
pub mod ticket;
