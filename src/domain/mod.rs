pub mod action;
pub mod channel;
pub mod lifecycle;
pub mod panel;
pub mod ticket;
