//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tiny_erp_core::{UserId, UserRole};

/// An operator of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// All mutable user fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub(crate) fn from_input(input: UserInput, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::generate(),
            name: input.name,
            email: input.email,
            role: input.role,
            created_at: now,
        }
    }

    pub(crate) fn replace(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.role = input.role;
    }
}
