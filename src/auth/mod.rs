//! Authentication module: credential persistence and the session gate.
//!
//! This module provides:
//! - `TokenStore`: persisted storage for the `{access, refresh}` token pair
//! - `resolve`: derives the current access token from the store
//! - `NavigationGuard`: the per-route gate protecting authenticated views
//!
//! The store is the only cross-route shared mutable resource; everything
//! else reads the shell-level session state top-down.

pub mod guard;
pub mod session;
pub mod store;

pub use guard::NavigationGuard;
pub use session::{resolve, SessionState};
pub use store::{Credential, TokenStore};
