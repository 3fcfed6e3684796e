use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::identity::{Role, UserProfile};
use crate::domain::order::{Order, OrderFilter, OrderItem, OrderScope, OrderStatus};

use super::{OrderStore, ProductStore, ProfileStore, SessionStore, StoreError};

// ============================================================================
// In-Memory Store
// ============================================================================
//
// Backs all four repository traits with tokio RwLock'd hash maps. Used by
// the demo binary and the test suite; per-call locking gives each operation
// the same "one short read-then-write" shape a SQL backend would have.
//
// Rows carry an insertion sequence so newest-first listings are stable when
// timestamps collide.
//
// ============================================================================

struct Stored<T> {
    seq: u64,
    row: T,
}

pub struct MemoryStore {
    sessions: RwLock<HashMap<String, Uuid>>,
    profiles: RwLock<HashMap<Uuid, Stored<UserProfile>>>,
    products: RwLock<HashMap<Uuid, Stored<Product>>>,
    orders: RwLock<HashMap<Uuid, Stored<Order>>>,
    order_items: RwLock<HashMap<Uuid, Vec<OrderItem>>>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            products: RwLock::new(HashMap::new()),
            orders: RwLock::new(HashMap::new()),
            order_items: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn user_for_token(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        Ok(self.sessions.read().await.get(token).copied())
    }

    async fn open_session(&self, user_id: Uuid) -> Result<String, StoreError> {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().await.insert(token.clone(), user_id);
        Ok(token)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(&user_id)
            .map(|stored| stored.row.clone()))
    }

    async fn get_role(&self, user_id: Uuid) -> Result<Option<Role>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(&user_id)
            .map(|stored| stored.row.role))
    }

    async fn insert_profile(&self, profile: UserProfile) -> Result<(), StoreError> {
        let seq = self.next_seq();
        self.profiles
            .write()
            .await
            .insert(profile.id, Stored { seq, row: profile });
        Ok(())
    }

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles.get_mut(&user_id).ok_or(StoreError::RowNotFound)?;
        stored.row.role = role;
        Ok(stored.row.clone())
    }

    async fn list_profiles(
        &self,
        role: Option<Role>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<UserProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        let mut rows: Vec<&Stored<UserProfile>> = profiles
            .values()
            .filter(|stored| role.map_or(true, |r| stored.row.role == r))
            .collect();
        rows.sort_by(|a, b| {
            b.row
                .created_at
                .cmp(&a.row.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.row.clone())
            .collect())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id).map(|stored| stored.row.clone()))
            .collect())
    }

    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let seq = self.next_seq();
        self.products
            .write()
            .await
            .insert(product.id, Stored { seq, row: product });
        Ok(())
    }

    async fn list_products(
        &self,
        category: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        let mut rows: Vec<&Stored<Product>> = products
            .values()
            .filter(|stored| category.map_or(true, |c| stored.row.category == c))
            .collect();
        rows.sort_by(|a, b| {
            b.row
                .created_at
                .cmp(&a.row.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.row.clone())
            .collect())
    }

    async fn decrement_stock(&self, product_id: Uuid, quantity: i32) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let stored = products.get_mut(&product_id).ok_or(StoreError::RowNotFound)?;

        if stored.row.stock >= quantity {
            stored.row.stock -= quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: Order) -> Result<Order, StoreError> {
        let seq = self.next_seq();
        let row = order.clone();
        self.orders
            .write()
            .await
            .insert(order.id, Stored { seq, row: order });
        Ok(row)
    }

    async fn delete_order(&self, order_id: Uuid) -> Result<(), StoreError> {
        // Items never outlive their parent order.
        self.orders.write().await.remove(&order_id);
        self.order_items.write().await.remove(&order_id);
        Ok(())
    }

    async fn insert_order_items(&self, items: Vec<OrderItem>) -> Result<(), StoreError> {
        let mut order_items = self.order_items.write().await;
        for item in items {
            order_items.entry(item.order_id).or_default().push(item);
        }
        Ok(())
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .get(&order_id)
            .map(|stored| stored.row.clone()))
    }

    async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .order_items
            .read()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        delivery_person_id: Option<Uuid>,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&order_id).ok_or(StoreError::RowNotFound)?;

        stored.row.status = status;
        stored.row.delivery_person_id = delivery_person_id;
        stored.row.updated_at = Utc::now();

        Ok(stored.row.clone())
    }

    async fn list_orders(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        let order_items = self.order_items.read().await;
        let products = self.products.read().await;

        let in_scope = |order: &Order| match scope {
            OrderScope::All => true,
            OrderScope::Customer(id) => order.customer_id == *id,
            OrderScope::Courier(id) => {
                order.delivery_person_id == Some(*id) || order.status == OrderStatus::Processing
            }
            OrderScope::Vendor(id) => order_items
                .get(&order.id)
                .map_or(false, |items| {
                    items.iter().any(|item| {
                        products
                            .get(&item.product_id)
                            .map_or(false, |stored| stored.row.vendor_id == *id)
                    })
                }),
        };

        let mut rows: Vec<&Stored<Order>> = orders
            .values()
            .filter(|stored| in_scope(&stored.row))
            .filter(|stored| filter.status.map_or(true, |s| stored.row.status == s))
            .collect();
        rows.sort_by(|a, b| {
            b.row
                .created_at
                .cmp(&a.row.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(rows
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(50))
            .map(|stored| stored.row.clone())
            .collect())
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Test helper: simulate an out-of-scope vendor price edit.
    pub async fn set_price(&self, product_id: Uuid, price: rust_decimal::Decimal) {
        if let Some(stored) = self.products.write().await.get_mut(&product_id) {
            stored.row.price = price;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
