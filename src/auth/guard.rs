use tracing::debug;

use super::store::TokenStore;
use crate::app::Route;

/// Warning shown when an anonymous visitor hits a protected route.
const LOGIN_REQUIRED_NOTICE: &str = "You need to be logged in";

/// Per-mount guard state. `Denied` and `Permitted` are terminal for the
/// instance; a fresh instance is mounted on every entry into a protected
/// route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Denied,
    Permitted,
}

/// Effect emitted by a denied guard: redirect plus a user-visible warning.
/// Emitted exactly once, at mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRedirect {
    pub route: Route,
    pub warning: &'static str,
}

/// The gate wrapping protected views.
///
/// Consults the session resolver once at mount and never re-validates:
/// a credential revoked while `Permitted` stays permitted until the next
/// navigation. Resolver failure modes collapse to "anonymous" - no network
/// or parse error is distinguished.
#[derive(Debug)]
pub struct NavigationGuard {
    state: GuardState,
    permitted: bool,
}

impl NavigationGuard {
    /// Mount the guard, running the session check synchronously.
    ///
    /// Returns the guard instance and, when the visitor is anonymous, the
    /// single redirect effect the caller must apply.
    pub fn mount(store: &TokenStore) -> (Self, Option<GuardRedirect>) {
        Self::mount_with(super::session::resolve(store))
    }

    /// Mount with an already-resolved access value.
    pub fn mount_with(access: Option<String>) -> (Self, Option<GuardRedirect>) {
        let mut guard = Self {
            state: GuardState::Checking,
            permitted: false,
        };
        match access {
            Some(_) => {
                guard.state = GuardState::Permitted;
                guard.permitted = true;
                (guard, None)
            }
            None => {
                debug!("Navigation guard denied anonymous visitor");
                guard.state = GuardState::Denied;
                (
                    guard,
                    Some(GuardRedirect {
                        route: Route::Login,
                        warning: LOGIN_REQUIRED_NOTICE,
                    }),
                )
            }
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// The permission flag: true only after a successful mount check.
    /// Protected content renders only while this holds.
    pub fn permits_render(&self) -> bool {
        self.permitted
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::tests::{credential, temp_store};

    #[test]
    fn test_anonymous_mount_is_denied_with_single_redirect() {
        let (guard, redirect) = NavigationGuard::mount_with(None);
        assert_eq!(guard.state(), GuardState::Denied);
        assert!(!guard.permits_render());

        // The redirect effect is produced exactly once, at mount
        let redirect = redirect.expect("denied guard must redirect");
        assert_eq!(redirect.route, Route::Login);
        assert_eq!(redirect.warning, LOGIN_REQUIRED_NOTICE);
    }

    #[test]
    fn test_authenticated_mount_is_permitted_without_redirect() {
        let (guard, redirect) = NavigationGuard::mount_with(Some("A".to_string()));
        assert_eq!(guard.state(), GuardState::Permitted);
        assert!(guard.permits_render());
        assert!(redirect.is_none());
    }

    #[test]
    fn test_mount_consults_store_through_resolver() {
        let store = temp_store();
        let (guard, redirect) = NavigationGuard::mount(&store);
        assert_eq!(guard.state(), GuardState::Denied);
        assert!(redirect.is_some());

        store.save(&credential("A", "R")).unwrap();
        let (guard, redirect) = NavigationGuard::mount(&store);
        assert!(guard.permits_render());
        assert!(redirect.is_none());
    }

    #[test]
    fn test_permitted_guard_is_not_revalidated() {
        let store = temp_store();
        store.save(&credential("A", "R")).unwrap();
        let (guard, _) = NavigationGuard::mount(&store);

        // Credential revoked mid-stay: the mounted instance stays permitted
        store.clear().unwrap();
        assert!(guard.permits_render());

        // A fresh mount (next navigation) restarts the check and denies
        let (guard, redirect) = NavigationGuard::mount(&store);
        assert!(!guard.permits_render());
        assert!(redirect.is_some());
    }
}
