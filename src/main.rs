use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod auth;
mod domain;
mod store;

use auth::SessionResolver;
use domain::catalog::{CatalogHandler, CreateProductRequest, InventoryLedger, ProductFilter};
use domain::identity::{ProfileAdminHandler, Role, UserFilter, UserProfile};
use domain::order::{
    CartItem, CreateOrderRequest, OrderCreateHandler, OrderFilter, OrderQueryHandler,
    OrderTransitionHandler,
};
use store::{MemoryStore, OrderStore, ProfileStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,marketplace_core=debug")),
        )
        .init();

    tracing::info!("🚀 Starting marketplace order core");

    // === 1. Stores and handlers ===
    let db = Arc::new(MemoryStore::new());

    let resolver = SessionResolver::new(db.clone(), db.clone());
    let catalog = CatalogHandler::new(db.clone());
    let order_creation = OrderCreateHandler::new(InventoryLedger::new(db.clone()), db.clone());
    let transitions = OrderTransitionHandler::new(db.clone());
    let order_queries = OrderQueryHandler::new(db.clone());
    let user_admin = ProfileAdminHandler::new(db.clone());

    // === 2. Seed one account per role and open their sessions ===
    // Signup/signin itself lives in the external identity provider; the demo
    // only needs tokens to resolve.
    let mut seeded = Vec::new();
    for (email, name, role) in [
        ("admin@market.test", "Ada Admin", Role::Admin),
        ("vendor@market.test", "Vera Vendor", Role::Vendor),
        ("customer@market.test", "Carl Customer", Role::Customer),
        ("courier@market.test", "Dina Courier", Role::Delivery),
        ("newhire@market.test", "Pat Newhire", Role::Customer),
    ] {
        let user_id = Uuid::new_v4();
        db.insert_profile(UserProfile {
            id: user_id,
            email: email.to_string(),
            full_name: name.to_string(),
            role,
            created_at: Utc::now(),
        })
        .await?;
        let token = db.open_session(user_id).await?;
        seeded.push((user_id, token));
    }

    let admin = resolver.resolve(Some(seeded[0].1.as_str())).await?;
    let vendor = resolver.resolve(Some(seeded[1].1.as_str())).await?;
    let customer = resolver.resolve(Some(seeded[2].1.as_str())).await?;
    let courier = resolver.resolve(Some(seeded[3].1.as_str())).await?;
    let new_hire_id = seeded[4].0;

    // === 3. Vendor stocks the catalog ===
    let beans = catalog
        .create_product(
            vendor,
            CreateProductRequest {
                name: "Espresso beans 1kg".to_string(),
                description: Some("Dark roast".to_string()),
                category: "groceries".to_string(),
                price: dec!(5.00),
                stock: 10,
            },
        )
        .await?;
    let filters = catalog
        .create_product(
            vendor,
            CreateProductRequest {
                name: "Paper filters".to_string(),
                description: None,
                category: "groceries".to_string(),
                price: dec!(3.00),
                stock: 1,
            },
        )
        .await?;

    let listed = catalog.list_products(ProductFilter::default()).await?;
    tracing::info!(count = listed.len(), "Catalog seeded");

    // === 4. Customer places an order ===
    let created = order_creation
        .handle(
            customer,
            CreateOrderRequest {
                items: vec![CartItem::new(beans.id, 2), CartItem::new(filters.id, 1)],
                delivery_address: "221B Baker Street".to_string(),
            },
        )
        .await?;
    tracing::info!(
        order_id = %created.order.id,
        total_amount = %created.order.total_amount,
        "✅ Order placed"
    );
    for line in db.items_for_order(created.order.id).await? {
        tracing::debug!(
            product_id = %line.product_id,
            quantity = line.quantity,
            price = %line.price,
            "Order line"
        );
    }

    // === 5. Walk the order through its lifecycle ===
    transitions
        .handle(admin, created.order.id, "processing")
        .await?;

    // The courier claims the unassigned processing order by shipping it.
    let shipped = transitions
        .handle(courier, created.order.id, "shipped")
        .await?;
    tracing::info!(
        order_id = %shipped.id,
        courier = ?shipped.delivery_person_id,
        "✅ Order claimed and shipped"
    );

    let delivered = transitions
        .handle(courier, created.order.id, "delivered")
        .await?;
    tracing::info!(order_id = %delivered.id, status = %delivered.status, "✅ Order delivered");

    // === 6. Role gates in action ===
    if let Err(error) = order_creation
        .handle(
            vendor,
            CreateOrderRequest {
                items: vec![CartItem::new(beans.id, 1)],
                delivery_address: "Vendor HQ".to_string(),
            },
        )
        .await
    {
        tracing::info!(kind = %error.category(), "Vendor cannot place orders");
    }
    if let Err(error) = transitions
        .handle(customer, created.order.id, "cancelled")
        .await
    {
        tracing::info!(kind = %error.category(), "Customer cannot drive the status machine");
    }
    if let Err(error) = catalog
        .create_product(
            customer,
            CreateProductRequest {
                name: "Homemade jam".to_string(),
                description: None,
                category: "groceries".to_string(),
                price: dec!(4.00),
                stock: 3,
            },
        )
        .await
    {
        tracing::info!(kind = %error.category(), "Customer cannot stock the catalog");
    }
    if let Err(error) = user_admin.assign_role(vendor, new_hire_id, "admin").await {
        tracing::info!(kind = %error.category(), "Only admins assign roles");
    }

    // === 7. Role-scoped views over the ledger ===
    let own = order_queries.list(customer, OrderFilter::default()).await?;
    tracing::info!(count = own.len(), "Customer sees their own orders");

    let vendor_view = order_queries.list(vendor, OrderFilter::default()).await?;
    tracing::info!(
        count = vendor_view.len(),
        "Vendor sees orders carrying their products"
    );

    let courier_view = order_queries.list(courier, OrderFilter::default()).await?;
    tracing::info!(
        count = courier_view.len(),
        "Courier sees assigned orders and the claimable pool"
    );

    // === 8. Admin surface ===
    let promoted = user_admin
        .assign_role(admin, new_hire_id, "delivery")
        .await?;
    tracing::info!(user_id = %promoted.id, role = %promoted.role, "New hire joins the courier fleet");

    let couriers = user_admin
        .list_users(
            admin,
            UserFilter {
                role: Some(Role::Delivery),
                ..Default::default()
            },
        )
        .await?;
    tracing::info!(count = couriers.len(), "Admin lists delivery staff");

    tracing::info!("🎉 Demo complete");

    Ok(())
}
