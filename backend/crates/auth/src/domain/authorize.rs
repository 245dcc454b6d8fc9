//! Authorization Rule
//!
//! Every self-service path (password reset, the reset page, the account view)
//! funnels through [`require_self`]; ownership of stored resources goes
//! through [`Principal::owns`].

use crate::domain::entity::{Caller, Principal};
use crate::error::{AuthError, AuthResult};

/// The caller must be authenticated as exactly `target_user_name`.
///
/// Anonymous callers get `Forbidden`, the same as a mismatched identity.
pub fn require_self<'a>(caller: &'a Caller, target_user_name: &str) -> AuthResult<&'a Principal> {
    match caller.principal() {
        Some(principal) if principal.is(target_user_name) => Ok(principal),
        _ => Err(AuthError::Forbidden),
    }
}

/// The caller must be authenticated; the identity itself is not checked.
pub fn require_authenticated(caller: &Caller) -> AuthResult<&Principal> {
    caller.principal().ok_or(AuthError::Unauthenticated)
}
