use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::{authorize, Identity};
use crate::store::ProductStore;

use super::errors::ProductError;
use super::value_objects::Product;
use crate::domain::identity::Role;

// ============================================================================
// Catalog Handler
// ============================================================================
//
// Orchestrates: Guard -> Product Store
//
// Listing is public; creation is restricted to vendors and admins and stamps
// the creator as the product's vendor.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

pub struct CatalogHandler {
    products: Arc<dyn ProductStore>,
}

impl CatalogHandler {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// List products, optionally filtered by category. No authentication
    /// required.
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductError> {
        let limit = filter.limit.unwrap_or(50);
        let products = self
            .products
            .list_products(filter.category.as_deref(), limit, filter.offset)
            .await?;
        Ok(products)
    }

    /// Create a product. Vendor or admin only.
    pub async fn create_product(
        &self,
        identity: Option<Identity>,
        request: CreateProductRequest,
    ) -> Result<Product, ProductError> {
        let actor = authorize(identity, &[Role::Vendor, Role::Admin])?;

        if request.name.trim().is_empty() {
            return Err(ProductError::MissingField("name"));
        }
        if request.category.trim().is_empty() {
            return Err(ProductError::MissingField("category"));
        }
        if request.price < Decimal::ZERO {
            return Err(ProductError::NegativePrice);
        }
        if request.stock < 0 {
            return Err(ProductError::NegativeStock);
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            stock: request.stock,
            vendor_id: actor.user_id,
            created_at: Utc::now(),
        };

        self.products.insert_product(product.clone()).await?;

        tracing::info!(
            product_id = %product.id,
            vendor_id = %product.vendor_id,
            category = %product.category,
            "Product created"
        );

        Ok(product)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
