use uuid::Uuid;

use crate::auth::AuthError;
use crate::domain::ErrorCategory;
use crate::store::StoreError;

// ============================================================================
// Catalog Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Stock cannot be negative")]
    NegativeStock,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProductError::MissingField(_)
            | ProductError::NegativePrice
            | ProductError::NegativeStock => ErrorCategory::BadRequest,
            ProductError::Auth(e) => e.category(),
            ProductError::Store(_) => ErrorCategory::Internal,
        }
    }
}

/// Failures raised while checking a cart against the live inventory.
/// Both carry the offending product id so callers can report it.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::ProductNotFound(_) => ErrorCategory::NotFound,
            InventoryError::InsufficientStock(_) => ErrorCategory::BadRequest,
            InventoryError::Store(_) => ErrorCategory::Internal,
        }
    }
}
