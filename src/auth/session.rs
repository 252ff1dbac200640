use super::store::TokenStore;

/// Shell-level session state, owned by the root `App`.
///
/// Initialized `Unresolved`, resolved exactly once at startup, and mutated
/// afterwards only by the login and logout flows. Everything else reads it
/// top-down and treats `Unresolved` as anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unresolved,
    Anonymous,
    Authenticated(String),
}

impl SessionState {
    /// The access token, if authenticated.
    pub fn access(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(access) => Some(access),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Build session state from a resolver result.
    pub fn from_access(access: Option<String>) -> Self {
        match access {
            Some(access) => SessionState::Authenticated(access),
            None => SessionState::Anonymous,
        }
    }
}

/// Derive the current access token from the token store.
///
/// Absent or malformed blob means anonymous. Only the access token is
/// surfaced; the refresh token never leaves the store. No network I/O,
/// never panics, safe to call repeatedly.
pub fn resolve(store: &TokenStore) -> Option<String> {
    store.read().map(|credential| credential.access)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::tests::{credential, temp_store};

    #[test]
    fn test_resolve_returns_access_field() {
        let store = temp_store();
        store.save(&credential("tok-123", "ref-456")).unwrap();
        assert_eq!(resolve(&store), Some("tok-123".to_string()));
    }

    #[test]
    fn test_resolve_absent_blob_is_anonymous() {
        let store = temp_store();
        assert_eq!(resolve(&store), None);
    }

    #[test]
    fn test_resolve_never_surfaces_refresh_token() {
        let store = temp_store();
        store.save(&credential("A", "SECRET-REFRESH")).unwrap();
        assert_eq!(resolve(&store).unwrap(), "A");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let store = temp_store();
        store.save(&credential("A", "R")).unwrap();
        let first = resolve(&store);
        let second = resolve(&store);
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_state_from_access() {
        assert_eq!(
            SessionState::from_access(Some("A".to_string())),
            SessionState::Authenticated("A".to_string())
        );
        assert_eq!(SessionState::from_access(None), SessionState::Anonymous);
    }

    #[test]
    fn test_unresolved_reads_as_anonymous() {
        let state = SessionState::Unresolved;
        assert!(!state.is_authenticated());
        assert!(state.access().is_none());
    }
}
