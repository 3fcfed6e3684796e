use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{authorize, Identity};
use crate::store::ProfileStore;

use super::errors::ProfileError;
use super::value_objects::{Role, UserProfile};

// ============================================================================
// Profile Admin Handler
// ============================================================================
//
// Orchestrates: Guard -> Profile Store
//
// Listing users and assigning roles is admin-only pass-through CRUD; the
// only business rule is role-name validation.
//
// ============================================================================

/// Filter for the user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub limit: Option<usize>,
    pub offset: usize,
}

pub struct ProfileAdminHandler {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileAdminHandler {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// List user profiles, optionally filtered by role. Admin only.
    pub async fn list_users(
        &self,
        identity: Option<Identity>,
        filter: UserFilter,
    ) -> Result<Vec<UserProfile>, ProfileError> {
        authorize(identity, &[Role::Admin])?;

        let limit = filter.limit.unwrap_or(50);
        let users = self
            .profiles
            .list_profiles(filter.role, limit, filter.offset)
            .await?;
        Ok(users)
    }

    /// Assign a new role to a user. Admin only.
    pub async fn assign_role(
        &self,
        identity: Option<Identity>,
        user_id: Uuid,
        role: &str,
    ) -> Result<UserProfile, ProfileError> {
        let actor = authorize(identity, &[Role::Admin])?;

        let role = Role::parse(role).ok_or_else(|| ProfileError::InvalidRole(role.to_string()))?;

        if self.profiles.get_profile(user_id).await?.is_none() {
            return Err(ProfileError::UserNotFound(user_id));
        }

        let updated = self.profiles.update_role(user_id, role).await?;

        tracing::info!(
            user_id = %user_id,
            role = %role,
            changed_by = %actor.user_id,
            "User role updated"
        );

        Ok(updated)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
