use crate::auth::AuthError;
use crate::domain::ErrorCategory;
use crate::store::StoreError;

// ============================================================================
// Identity Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("User not found: {0}")]
    UserNotFound(uuid::Uuid),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProfileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfileError::InvalidRole(_) => ErrorCategory::BadRequest,
            ProfileError::UserNotFound(_) => ErrorCategory::NotFound,
            ProfileError::Auth(e) => e.category(),
            ProfileError::Store(_) => ErrorCategory::Internal,
        }
    }
}
