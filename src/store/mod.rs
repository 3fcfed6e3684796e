use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::identity::{Role, UserProfile};
use crate::domain::order::{Order, OrderFilter, OrderItem, OrderScope, OrderStatus};

pub mod memory;

#[cfg(test)]
pub mod test_fixtures;

pub use memory::MemoryStore;

// ============================================================================
// Store Layer - Repository Traits
// ============================================================================
//
// Every workflow takes its stores as explicitly passed trait objects; there
// is no ambient database handle. The in-memory backend implements all four
// traits; a SQL backend would slot in behind the same contracts.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Row not found")]
    RowNotFound,

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Opaque session credentials, owned by the identity subsystem. The core
/// only resolves tokens; `open_session` exists so the demo binary and tests
/// can mint them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn user_for_token(&self, token: &str) -> Result<Option<Uuid>, StoreError>;

    async fn open_session(&self, user_id: Uuid) -> Result<String, StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    async fn get_role(&self, user_id: Uuid) -> Result<Option<Role>, StoreError>;

    async fn insert_profile(&self, profile: UserProfile) -> Result<(), StoreError>;

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<UserProfile, StoreError>;

    async fn list_profiles(
        &self,
        role: Option<Role>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<UserProfile>, StoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch the rows for exactly the requested ids; absent ids are simply
    /// missing from the result.
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreError>;

    async fn insert_product(&self, product: Product) -> Result<(), StoreError>;

    async fn list_products(
        &self,
        category: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Product>, StoreError>;

    /// Conditional decrement: subtract `quantity` only if that much stock
    /// remains, and report whether the subtraction happened. Stock never
    /// goes negative through this call.
    async fn decrement_stock(&self, product_id: Uuid, quantity: i32) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: Order) -> Result<Order, StoreError>;

    async fn delete_order(&self, order_id: Uuid) -> Result<(), StoreError>;

    async fn insert_order_items(&self, items: Vec<OrderItem>) -> Result<(), StoreError>;

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, StoreError>;

    async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, StoreError>;

    /// Write status and courier assignment together; callers rely on the
    /// pair never being observable half-updated.
    async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        delivery_person_id: Option<Uuid>,
    ) -> Result<Order, StoreError>;

    async fn list_orders(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, StoreError>;
}
