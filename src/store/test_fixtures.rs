use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::identity::{Identity, Role, UserProfile};
use crate::domain::order::{Order, OrderStatus};

use super::memory::MemoryStore;
use super::{ProductStore, ProfileStore};

// ============================================================================
// Shared Test Fixtures
// ============================================================================

/// One seeded profile per role, plus the store they live in.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub admin: Identity,
    pub vendor: Identity,
    pub customer: Identity,
    pub courier: Identity,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let mut identities = Vec::new();
        for (email, role) in [
            ("admin@example.com", Role::Admin),
            ("vendor@example.com", Role::Vendor),
            ("customer@example.com", Role::Customer),
            ("courier@example.com", Role::Delivery),
        ] {
            let row = profile(email, role);
            identities.push(Identity {
                user_id: row.id,
                role,
            });
            store.insert_profile(row).await.unwrap();
        }

        Self {
            store,
            admin: identities[0],
            vendor: identities[1],
            customer: identities[2],
            courier: identities[3],
        }
    }

    pub async fn add_product(&self, product: Product) -> Uuid {
        let id = product.id;
        self.store.insert_product(product).await.unwrap();
        id
    }
}

pub fn profile(email: &str, role: Role) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: email.split('@').next().unwrap_or("someone").to_string(),
        role,
        created_at: Utc::now(),
    }
}

pub fn product(vendor_id: Uuid, name: &str, price: Decimal, stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        category: "groceries".to_string(),
        price,
        stock,
        vendor_id,
        created_at: Utc::now(),
    }
}

pub fn order_row(customer_id: Uuid, status: OrderStatus) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        customer_id,
        status,
        total_amount: Decimal::ZERO,
        delivery_address: "1 Test Lane".to_string(),
        delivery_person_id: None,
        created_at: now,
        updated_at: now,
    }
}
