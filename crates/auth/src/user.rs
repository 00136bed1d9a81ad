//! Demo user directory with mock credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{Entity, UserId};

use crate::{AuthzError, Role};

/// A user of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone)]
struct Credential {
    email: String,
    password: String,
}

/// In-memory set of users and their login credentials.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    credentials: Vec<Credential>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three demo accounts, one per role.
    pub fn demo() -> Self {
        let now = Utc::now();
        let mut directory = Self::new();
        for (id, name, email, password, role) in [
            ("1", "John Doe", "admin@gentselegante.com", "admin123", Role::SuperAdmin),
            ("2", "Jane Smith", "manager@gentselegante.com", "manager123", Role::Admin),
            ("3", "Mike Johnson", "sales@gentselegante.com", "sales123", Role::SalesStaff),
        ] {
            directory.register(
                User {
                    id: UserId::from(id),
                    name: name.to_string(),
                    email: email.to_string(),
                    role,
                    created_at: now,
                },
                password,
            );
        }
        directory
    }

    pub fn register(&mut self, user: User, password: &str) {
        self.credentials.push(Credential {
            email: user.email.clone(),
            password: password.to_string(),
        });
        self.users.push(user);
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Exact email + password match against the stored credentials.
    pub fn login(&self, email: &str, password: &str) -> Result<&User, AuthzError> {
        let matched = self
            .credentials
            .iter()
            .any(|c| c.email == email && c.password == password);
        if !matched {
            tracing::warn!(email, "login failed");
            return Err(AuthzError::InvalidCredentials);
        }
        let user = self
            .users
            .iter()
            .find(|u| u.email == email)
            .ok_or(AuthzError::InvalidCredentials)?;
        tracing::info!(email, role = %user.role, "login succeeded");
        Ok(user)
    }

    /// First user holding `role`, for quick role switching in demos.
    pub fn switch_role(&self, role: Role) -> Option<&User> {
        self.users.iter().find(|u| u.role == role)
    }
}
