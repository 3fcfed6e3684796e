use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::{authorize, Identity};
use crate::domain::catalog::InventoryLedger;
use crate::domain::identity::Role;
use crate::store::OrderStore;

use super::errors::OrderError;
use super::value_objects::{CartItem, CreatedOrder, Order, OrderItem, OrderStatus};

// ============================================================================
// Order Creation Workflow
// ============================================================================
//
// Orchestrates: Guard -> Inventory Ledger -> Order Store
//
// Not a single atomic transaction; an explicit sequence with one
// compensating action:
//
// 1. Validate the cart (before any read or write).
// 2. Check availability and snapshot prices in one inventory read.
// 3. Persist the order header (pending).
// 4. Persist the item set. If this fails, delete the header and surface the
//    error: an order must never exist without its items.
// 5. Best-effort stock decrements. Failures are logged and the order stands;
//    stock may lag behind committed orders under failure.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub items: Vec<CartItem>,
    pub delivery_address: String,
}

pub struct OrderCreateHandler {
    ledger: InventoryLedger,
    orders: Arc<dyn OrderStore>,
}

impl OrderCreateHandler {
    pub fn new(ledger: InventoryLedger, orders: Arc<dyn OrderStore>) -> Self {
        Self { ledger, orders }
    }

    /// Create an order for the authenticated customer.
    pub async fn handle(
        &self,
        identity: Option<Identity>,
        request: CreateOrderRequest,
    ) -> Result<CreatedOrder, OrderError> {
        let actor = authorize(identity, &[Role::Customer])?;

        if request.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        if request.delivery_address.trim().is_empty() {
            return Err(OrderError::MissingDeliveryAddress);
        }
        for line in &request.items {
            if line.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(line.quantity));
            }
        }

        let priced = self.ledger.check_and_price(&request.items).await?;

        let total_amount: Decimal = priced
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();

        let now = Utc::now();
        let order = self
            .orders
            .insert_order(Order {
                id: Uuid::new_v4(),
                customer_id: actor.user_id,
                status: OrderStatus::Pending,
                total_amount,
                delivery_address: request.delivery_address,
                delivery_person_id: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let items: Vec<OrderItem> = priced
            .iter()
            .map(|line| OrderItem {
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        if let Err(error) = self.orders.insert_order_items(items.clone()).await {
            // An order must never be visible without its items.
            if let Err(cleanup) = self.orders.delete_order(order.id).await {
                tracing::error!(
                    order_id = %order.id,
                    error = %cleanup,
                    "Compensating order delete failed"
                );
            }
            return Err(error.into());
        }

        for item in &items {
            self.ledger.apply_decrement(item.product_id, item.quantity).await;
        }

        tracing::info!(
            order_id = %order.id,
            customer_id = %actor.user_id,
            total_amount = %order.total_amount,
            item_count = items.len(),
            "Order created"
        );

        Ok(CreatedOrder { order, items })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
