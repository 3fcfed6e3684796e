use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

// ============================================================================
// Identity Value Objects
// ============================================================================

/// The four marketplace roles. Every authenticated request resolves to
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vendor,
    Customer,
    Delivery,
}

impl Role {
    /// Parse a lowercase role name. Unknown strings yield `None`; callers
    /// decide whether that is a validation error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "vendor" => Some(Role::Vendor),
            "customer" => Some(Role::Customer),
            "delivery" => Some(Role::Delivery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendor => "vendor",
            Role::Customer => "customer",
            Role::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user profile row, owned by the identity subsystem.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A resolved request identity: who is calling, and as what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

// ============================================================================
// Unit Tests
// ============================================================================
