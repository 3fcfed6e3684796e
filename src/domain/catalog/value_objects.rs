use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// ============================================================================
// Catalog Value Objects
// ============================================================================

/// A product row. `stock` is kept non-negative by the store's conditional
/// decrement; `price` is validated non-negative at creation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub vendor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_serialization() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Espresso beans".to_string(),
            description: None,
            category: "groceries".to_string(),
            price: dec!(12.50),
            stock: 40,
            vendor_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&product).unwrap();
        let deserialized: Product = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id, product.id);
        assert_eq!(deserialized.price, dec!(12.50));
        assert_eq!(deserialized.stock, 40);
    }
}
