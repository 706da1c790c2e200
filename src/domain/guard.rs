//! Authorization guard: a pure decision over session state and a capability.

use velina_api_types::Role;

use super::session::SessionState;
use super::types::{Capability, GuardDecision, RedirectTarget};

/// Decide whether a view requiring `capability` may render.
///
/// Total function of its inputs; consulted on every view activation and never
/// cached. While identity resolution is in flight the decision is always
/// `Defer`, regardless of whatever identity is currently held.
pub fn evaluate(state: &SessionState, capability: Capability) -> GuardDecision {
    if state.resolving {
        return GuardDecision::Defer;
    }

    match capability {
        Capability::Authenticated => {
            if state.identity.is_some() {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(RedirectTarget::Login)
            }
        }
        Capability::Admin => match &state.identity {
            Some(identity) if identity.role == Role::Admin => GuardDecision::Allow,
            _ => GuardDecision::Redirect(RedirectTarget::Home),
        },
    }
}
