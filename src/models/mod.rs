//! Data models for Bankly API entities.
//!
//! This module contains the data structures exchanged with the banking API:
//!
//! - `Account`, `AccountType`: bank accounts owned by the logged-in user
//! - `Statement`, `TransactionType`, `TransactionRequest`: transactions
//! - `Notification`: unread notification messages shown in the header

pub mod account;
pub mod notification;
pub mod transaction;

pub use account::{Account, AccountType};
pub use notification::Notification;
pub use transaction::{Statement, TransactionRequest, TransactionType};
