use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use rust_decimal::Decimal;

use crate::domain::order::CartItem;
use crate::store::ProductStore;

use super::errors::InventoryError;

// ============================================================================
// Inventory Ledger
// ============================================================================
//
// Read-modify-write view over product stock used by order creation.
//
// `check_and_price` validates a cart against the live inventory in a single
// read and returns price snapshots; it never mutates stock. The caller is
// responsible for committing matching decrements via `apply_decrement` once
// the order items are durably recorded.
//
// Across concurrent orders the check and the decrement are not serialized:
// two orders can both pass the check before either decrements. The
// store-level decrement is conditional on remaining stock, so the race can
// make stock lag behind committed orders but never drives it negative.
//
// ============================================================================

/// A cart line priced against the catalog at check time. The price here is
/// the snapshot that gets persisted on the order item.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

pub struct InventoryLedger {
    products: Arc<dyn ProductStore>,
}

impl InventoryLedger {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Fetch the requested products in one read, verify existence and
    /// availability for every line, and return the priced lines.
    pub async fn check_and_price(
        &self,
        lines: &[CartItem],
    ) -> Result<Vec<PricedItem>, InventoryError> {
        let ids: Vec<Uuid> = lines.iter().map(|line| line.product_id).collect();
        let products = self.products.get_by_ids(&ids).await?;
        let by_id: HashMap<Uuid, _> = products.iter().map(|p| (p.id, p)).collect();

        let mut priced = Vec::with_capacity(lines.len());
        for line in lines {
            let product = by_id
                .get(&line.product_id)
                .ok_or(InventoryError::ProductNotFound(line.product_id))?;

            if line.quantity > product.stock {
                return Err(InventoryError::InsufficientStock(line.product_id));
            }

            priced.push(PricedItem {
                product_id: line.product_id,
                quantity: line.quantity,
                price: product.price,
            });
        }

        Ok(priced)
    }

    /// Best-effort stock decrement, applied after the order item is durably
    /// recorded. Failures are logged and never abort the order; stock
    /// bookkeeping may lag behind committed orders under failure.
    pub async fn apply_decrement(&self, product_id: Uuid, quantity: i32) {
        match self.products.decrement_stock(product_id, quantity).await {
            Ok(true) => {
                tracing::debug!(product_id = %product_id, quantity, "Stock decremented");
            }
            Ok(false) => {
                tracing::warn!(
                    product_id = %product_id,
                    quantity,
                    "Stock decrement missed: insufficient stock at commit time"
                );
            }
            Err(error) => {
                tracing::error!(
                    product_id = %product_id,
                    quantity,
                    error = %error,
                    "Stock decrement failed"
                );
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
