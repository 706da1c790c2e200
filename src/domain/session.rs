//! Session state: who is acting, and whether that is still being resolved.

use velina_api_types::User;

/// The authenticated actor. Replaced wholesale on login/logout, never
/// field-patched.
pub type Identity = User;

/// The only datum shared across views.
///
/// `resolving` is true during the initial identity resolution and during
/// explicit login/register/logout calls; consumers must treat it as
/// "decision deferred", never as "unauthenticated". `version` increments on
/// every write so consumers can tell snapshots apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub resolving: bool,
    pub version: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            resolving: true,
            version: 0,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
