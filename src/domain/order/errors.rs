use uuid::Uuid;

use crate::auth::AuthError;
use crate::domain::catalog::InventoryError;
use crate::domain::ErrorCategory;
use crate::store::StoreError;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

/// Failures from the order creation workflow.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Delivery address is required")]
    MissingDeliveryAddress,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::EmptyItems
            | OrderError::MissingDeliveryAddress
            | OrderError::InvalidQuantity(_) => ErrorCategory::BadRequest,
            OrderError::Inventory(e) => e.category(),
            OrderError::Auth(e) => e.category(),
            OrderError::Store(_) => ErrorCategory::Internal,
        }
    }
}

/// Failures from the status transition engine.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Transition from {from} to {to} is not allowed")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("You can only update orders assigned to you")]
    Forbidden,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TransitionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TransitionError::OrderNotFound(_) => ErrorCategory::NotFound,
            TransitionError::InvalidStatus(_) | TransitionError::InvalidTransition { .. } => {
                ErrorCategory::BadRequest
            }
            TransitionError::Forbidden => ErrorCategory::Forbidden,
            TransitionError::Auth(e) => e.category(),
            TransitionError::Store(_) => ErrorCategory::Internal,
        }
    }
}
