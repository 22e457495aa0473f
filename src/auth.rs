//! Session credentials for the console.
//!
//! The two tokens are read from the [`TokenStore`] once when the app starts
//! and then travel with the [`crate::api::ApiClient`]; nothing else reads
//! browser storage directly.

use crate::error::Result;
use crate::storage::{TokenStore, ADMIN_AUTH_KEY, AUTH_TOKEN_KEY};

pub const ADMIN_AUTH_HEADER: &str = "X-Admin-Auth";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    token: Option<String>,
    admin_auth: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AuthContext {
    pub fn new(token: Option<String>, admin_auth: Option<String>) -> Self {
        Self {
            token: non_blank(token),
            admin_auth: non_blank(admin_auth),
        }
    }

    pub fn load(store: &dyn TokenStore) -> Self {
        let context = Self::new(store.get(AUTH_TOKEN_KEY), store.get(ADMIN_AUTH_KEY));
        log::debug!(
            "auth context loaded (token: {}, admin flag: {})",
            context.token.is_some(),
            context.admin_auth.is_some()
        );
        context
    }

    /// Forgets both tokens here and in the store. Both keys are attempted;
    /// the first failure is returned.
    pub fn clear(&mut self, store: &dyn TokenStore) -> Result<()> {
        self.token = None;
        self.admin_auth = None;
        let token = store.remove(AUTH_TOKEN_KEY);
        let admin_auth = store.remove(ADMIN_AUTH_KEY);
        token.and(admin_auth)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        if let Some(flag) = &self.admin_auth {
            headers.push((ADMIN_AUTH_HEADER, flag.clone()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use crate::storage::MemoryTokenStore;

    /// Refuses to remove the auth token but drops everything else.
    struct StuckTokenStore(MemoryTokenStore);

    impl TokenStore for StuckTokenStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == AUTH_TOKEN_KEY {
                return Err(ConsoleError::Storage("quota".into()));
            }
            self.0.remove(key)
        }
    }

    #[test]
    fn test_load_reads_both_tokens() {
        let store = MemoryTokenStore::with_tokens("abc123", "true");
        let auth = AuthContext::load(&store);

        assert!(auth.is_authenticated());
        assert_eq!(
            auth.headers(),
            vec![
                ("Authorization", "Bearer abc123".to_string()),
                (ADMIN_AUTH_HEADER, "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_values_are_treated_as_missing() {
        let store = MemoryTokenStore::with_tokens("   ", "");
        let auth = AuthContext::load(&store);

        assert!(!auth.is_authenticated());
        assert!(auth.headers().is_empty());
    }

    #[test]
    fn test_clear_removes_tokens_from_store() {
        let store = MemoryTokenStore::with_tokens("abc123", "true");
        let mut auth = AuthContext::load(&store);

        auth.clear(&store).unwrap();

        assert!(!auth.is_authenticated());
        assert!(store.is_empty());
        assert_eq!(AuthContext::load(&store), AuthContext::default());
    }

    #[test]
    fn test_clear_removes_admin_flag_even_if_token_removal_fails() {
        let store = StuckTokenStore(MemoryTokenStore::with_tokens("abc123", "true"));
        let mut auth = AuthContext::load(&store);

        let result = auth.clear(&store);

        assert_eq!(result, Err(ConsoleError::Storage("quota".into())));
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(ADMIN_AUTH_KEY), None);
        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("abc123".to_string()));
    }
}
