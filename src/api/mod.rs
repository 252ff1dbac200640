//! REST API client module for the Bankly banking service.
//!
//! This module provides the `ApiClient` for communicating with the banking
//! API: authentication, accounts, transactions, and notifications.
//!
//! Authenticated endpoints use JWT bearer tokens obtained from the
//! `/api/authentication/token/` endpoint. Form submissions return a typed
//! `FormOutcome` so no caller ever inspects raw error-body shapes.

pub mod client;
pub mod error;
pub mod outcome;

pub use client::ApiClient;
pub use error::ApiError;
pub use outcome::FormOutcome;
