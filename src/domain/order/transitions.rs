use uuid::Uuid;

use crate::domain::identity::{Identity, Role};

use super::value_objects::{Order, OrderStatus};

// ============================================================================
// Transition Rules - Status Edges and Per-Role Permissions
// ============================================================================
//
// Pure functions over (actor, order, new status); no store access. The
// handler turns the resulting rule into a single store write or an error.
//
// ============================================================================

/// Outcome of evaluating a requested transition against the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    /// Write the new status; the assignment is untouched.
    Permit,
    /// Claim path: write the new status and assign the acting courier in the
    /// same write.
    PermitClaim,
    /// The actor may not act on this order at all.
    Forbid,
    /// The actor may act on the order, but this edge is not in the machine.
    Reject,
}

/// The order status machine:
/// pending -> processing -> shipped -> delivered, with cancellation possible
/// from pending or processing. Delivered and cancelled are terminal.
pub fn allowed_edge(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    if from.is_terminal() {
        return false;
    }

    matches!(
        (from, to),
        (Pending, Processing)
            | (Pending, Cancelled)
            | (Processing, Shipped)
            | (Processing, Cancelled)
            | (Shipped, Delivered)
    )
}

/// The permission table, one arm per role.
///
/// Admins are exempt from the edge check on purpose: they may set any status
/// on any order, unconditionally. Couriers follow the machine's edges and
/// the assignment rule, with claiming as the one special case.
pub fn allowed_transition(actor: &Identity, order: &Order, new_status: OrderStatus) -> TransitionRule {
    match actor.role {
        Role::Admin => TransitionRule::Permit,
        Role::Delivery => courier_rule(actor.user_id, order, new_status),
        Role::Customer | Role::Vendor => TransitionRule::Forbid,
    }
}

fn courier_rule(courier: Uuid, order: &Order, new_status: OrderStatus) -> TransitionRule {
    let along_edge = |rule| {
        if allowed_edge(order.status, new_status) {
            rule
        } else {
            TransitionRule::Reject
        }
    };

    match order.delivery_person_id {
        Some(assignee) if assignee == courier => along_edge(TransitionRule::Permit),
        Some(_) => TransitionRule::Forbid,
        None => {
            // Claiming: shipping an unassigned processing order takes
            // ownership of it.
            if order.status == OrderStatus::Processing && new_status == OrderStatus::Shipped {
                TransitionRule::PermitClaim
            } else if new_status == OrderStatus::Processing {
                // An unassigned order may be accepted for processing.
                along_edge(TransitionRule::Permit)
            } else {
                TransitionRule::Forbid
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
