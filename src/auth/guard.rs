use crate::domain::identity::{Identity, Role};
use crate::domain::ErrorCategory;

// ============================================================================
// Role Authorization Guard
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Role not permitted for this operation")]
    Forbidden,
}

impl AuthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthError::Unauthorized => ErrorCategory::Unauthorized,
            AuthError::Forbidden => ErrorCategory::Forbidden,
        }
    }
}

/// Check a resolved identity against the roles an operation requires.
///
/// An empty `required` set admits any authenticated identity. Pure and
/// side-effect-free; handlers call this before touching any store.
pub fn authorize(identity: Option<Identity>, required: &[Role]) -> Result<Identity, AuthError> {
    let identity = identity.ok_or(AuthError::Unauthorized)?;

    if required.is_empty() || required.contains(&identity.role) {
        Ok(identity)
    } else {
        Err(AuthError::Forbidden)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
