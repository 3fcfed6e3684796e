use std::sync::Arc;

use crate::domain::identity::Identity;
use crate::store::{ProfileStore, SessionStore, StoreError};

// ============================================================================
// Session Resolver
// ============================================================================
//
// Turns a request-scoped credential into an Identity: token -> user id via
// the session store, user id -> role via the profile store. A miss at any
// step is "unauthenticated", never an error; role-matching logic lives in
// the guard, not here.
//
// ============================================================================

pub struct SessionResolver {
    sessions: Arc<dyn SessionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl SessionResolver {
    pub fn new(sessions: Arc<dyn SessionStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { sessions, profiles }
    }

    /// Resolve an optional bearer token to the calling identity.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Option<Identity>, StoreError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let Some(user_id) = self.sessions.user_for_token(token).await? else {
            tracing::debug!("Unknown session token");
            return Ok(None);
        };

        let Some(role) = self.profiles.get_role(user_id).await? else {
            tracing::debug!(user_id = %user_id, "Session user has no profile");
            return Ok(None);
        };

        Ok(Some(Identity { user_id, role }))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Role;
    use crate::store::test_fixtures::Fixture;
    use uuid::Uuid;

    fn resolver(fx: &Fixture) -> SessionResolver {
        SessionResolver::new(fx.store.clone(), fx.store.clone())
    }

    #[tokio::test]
    async fn test_valid_token_resolves_to_identity() {
        let fx = Fixture::new().await;
        let token = fx.store.open_session(fx.customer.user_id).await.unwrap();

        let identity = resolver(&fx)
            .resolve(Some(token.as_str()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.user_id, fx.customer.user_id);
        assert_eq!(identity.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthenticated() {
        let fx = Fixture::new().await;
        assert!(resolver(&fx).resolve(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let fx = Fixture::new().await;
        let resolved = resolver(&fx).resolve(Some("not-a-token")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_token_without_profile_is_unauthenticated() {
        let fx = Fixture::new().await;
        // A session whose user has no profile row (e.g. deleted account).
        let orphan = Uuid::new_v4();
        let token = fx.store.open_session(orphan).await.unwrap();

        let resolved = resolver(&fx).resolve(Some(token.as_str())).await.unwrap();
        assert!(resolved.is_none());
    }
}
