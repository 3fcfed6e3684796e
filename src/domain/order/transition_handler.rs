use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{authorize, Identity};
use crate::domain::identity::Role;
use crate::store::OrderStore;

use super::errors::TransitionError;
use super::transitions::{allowed_transition, TransitionRule};
use super::value_objects::{Order, OrderStatus};

// ============================================================================
// Order Status Transition Engine
// ============================================================================
//
// Orchestrates: Guard -> Transition Rules -> Order Store
//
// Status and (on the claim path) the courier assignment go out in one store
// write; no partial update is observable.
//
// ============================================================================

pub struct OrderTransitionHandler {
    orders: Arc<dyn OrderStore>,
}

impl OrderTransitionHandler {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Move an order to `new_status` on behalf of the authenticated actor.
    pub async fn handle(
        &self,
        identity: Option<Identity>,
        order_id: Uuid,
        new_status: &str,
    ) -> Result<Order, TransitionError> {
        let actor = authorize(identity, &[Role::Delivery, Role::Admin])?;

        let new_status = OrderStatus::parse(new_status)
            .ok_or_else(|| TransitionError::InvalidStatus(new_status.to_string()))?;

        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(TransitionError::OrderNotFound(order_id))?;

        match allowed_transition(&actor, &order, new_status) {
            TransitionRule::Permit => {
                let updated = self
                    .orders
                    .update_order_status(order_id, new_status, order.delivery_person_id)
                    .await?;

                tracing::info!(
                    order_id = %order_id,
                    from = %order.status,
                    to = %new_status,
                    actor = %actor.user_id,
                    role = %actor.role,
                    "Order status updated"
                );

                Ok(updated)
            }
            TransitionRule::PermitClaim => {
                let updated = self
                    .orders
                    .update_order_status(order_id, new_status, Some(actor.user_id))
                    .await?;

                tracing::info!(
                    order_id = %order_id,
                    courier = %actor.user_id,
                    "Order claimed and shipped"
                );

                Ok(updated)
            }
            TransitionRule::Forbid => Err(TransitionError::Forbidden),
            TransitionRule::Reject => Err(TransitionError::InvalidTransition {
                from: order.status,
                to: new_status,
            }),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCategory;
    use crate::store::test_fixtures::{order_row, Fixture};

    async fn seed_order(fx: &Fixture, status: OrderStatus, courier: Option<Uuid>) -> Uuid {
        let mut order = order_row(fx.customer.user_id, status);
        order.delivery_person_id = courier;
        fx.store.insert_order(order).await.unwrap().id
    }

    #[tokio::test]
    async fn test_courier_claim_assigns_and_ships_atomically() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Processing, None).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let updated = handler
            .handle(Some(fx.courier), order_id, "shipped")
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(updated.delivery_person_id, Some(fx.courier.user_id));

        let stored = fx.store.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.delivery_person_id, Some(fx.courier.user_id));
    }

    #[tokio::test]
    async fn test_courier_cannot_update_someone_elses_order() {
        let fx = Fixture::new().await;
        let other_courier = Uuid::new_v4();
        let order_id = seed_order(&fx, OrderStatus::Shipped, Some(other_courier)).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let err = handler
            .handle(Some(fx.courier), order_id, "delivered")
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::Forbidden));
        assert_eq!(err.category(), ErrorCategory::Forbidden);

        // Untouched.
        let stored = fx.store.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.delivery_person_id, Some(other_courier));
    }

    #[tokio::test]
    async fn test_assigned_courier_walks_the_lifecycle() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Shipped, Some(fx.courier.user_id)).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let updated = handler
            .handle(Some(fx.courier), order_id, "delivered")
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert_eq!(updated.delivery_person_id, Some(fx.courier.user_id));
    }

    #[tokio::test]
    async fn test_courier_cannot_skip_edges_on_own_order() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Delivered, Some(fx.courier.user_id)).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let err = handler
            .handle(Some(fx.courier), order_id, "pending")
            .await
            .unwrap_err();

        match err {
            TransitionError::InvalidTransition { from, to } => {
                assert_eq!(from, OrderStatus::Delivered);
                assert_eq!(to, OrderStatus::Pending);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_courier_accepting_pending_order_does_not_assign() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Pending, None).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let updated = handler
            .handle(Some(fx.courier), order_id, "processing")
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Processing);
        // Assignment only happens on the claim path.
        assert_eq!(updated.delivery_person_id, None);
    }

    #[tokio::test]
    async fn test_admin_may_set_any_status_regardless_of_assignment() {
        let fx = Fixture::new().await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        for target in ["pending", "processing", "shipped", "delivered", "cancelled"] {
            let order_id =
                seed_order(&fx, OrderStatus::Delivered, Some(Uuid::new_v4())).await;

            let updated = handler
                .handle(Some(fx.admin), order_id, target)
                .await
                .unwrap();

            assert_eq!(updated.status.as_str(), target);
        }
    }

    #[tokio::test]
    async fn test_admin_writes_do_not_touch_the_assignment() {
        let fx = Fixture::new().await;
        let courier = Uuid::new_v4();
        let order_id = seed_order(&fx, OrderStatus::Shipped, Some(courier)).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let updated = handler
            .handle(Some(fx.admin), order_id, "delivered")
            .await
            .unwrap();

        assert_eq!(updated.delivery_person_id, Some(courier));
    }

    #[tokio::test]
    async fn test_unknown_status_value_is_rejected_before_any_write() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Pending, None).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let err = handler
            .handle(Some(fx.admin), order_id, "returned")
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::InvalidStatus(_)));
        assert_eq!(err.category(), ErrorCategory::BadRequest);
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let fx = Fixture::new().await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        let err = handler
            .handle(Some(fx.admin), Uuid::new_v4(), "processing")
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::OrderNotFound(_)));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn test_customer_and_vendor_are_rejected_at_the_guard() {
        let fx = Fixture::new().await;
        let order_id = seed_order(&fx, OrderStatus::Pending, None).await;
        let handler = OrderTransitionHandler::new(fx.store.clone());

        for identity in [fx.customer, fx.vendor] {
            let err = handler
                .handle(Some(identity), order_id, "cancelled")
                .await
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Forbidden);
        }

        let err = handler.handle(None, order_id, "cancelled").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
    }
}
