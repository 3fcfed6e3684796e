use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{authorize, Identity};
use crate::domain::identity::Role;
use crate::store::OrderStore;

use super::errors::OrderError;
use super::value_objects::{Order, OrderStatus};

// ============================================================================
// Order Queries - Role-Scoped Listing
// ============================================================================
//
// Every role may list orders, but each sees a different slice:
// - admin:    everything
// - customer: their own orders
// - delivery: orders assigned to them, plus the claimable processing pool
// - vendor:   orders containing at least one of their products
//
// ============================================================================

/// Which orders an actor is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    Customer(Uuid),
    Courier(Uuid),
    Vendor(Uuid),
}

impl OrderScope {
    pub fn for_identity(identity: &Identity) -> Self {
        match identity.role {
            Role::Admin => OrderScope::All,
            Role::Customer => OrderScope::Customer(identity.user_id),
            Role::Delivery => OrderScope::Courier(identity.user_id),
            Role::Vendor => OrderScope::Vendor(identity.user_id),
        }
    }
}

/// Listing filter: optional status, newest-first pagination.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: Option<usize>,
    pub offset: usize,
}

pub struct OrderQueryHandler {
    orders: Arc<dyn OrderStore>,
}

impl OrderQueryHandler {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// List the orders visible to the authenticated actor.
    pub async fn list(
        &self,
        identity: Option<Identity>,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, OrderError> {
        // Any authenticated role may list; the scope does the narrowing.
        let actor = authorize(identity, &[])?;
        let scope = OrderScope::for_identity(&actor);

        let orders = self.orders.list_orders(&scope, &filter).await?;
        Ok(orders)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
