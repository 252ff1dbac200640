//! Per-route content rendering.

pub mod account;
pub mod dashboard;
pub mod form;
pub mod login;
pub mod register;
