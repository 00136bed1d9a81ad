use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Permission, Role, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Check that `user` holds `required`.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(user: &User, required: &Permission) -> Result<(), AuthzError> {
    if required.granted_to(user.role) {
        Ok(())
    } else {
        tracing::debug!(user = %user.email, permission = %required, "permission denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Top-level sections of the dashboard, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    Products,
    StockIn,
    Sales,
    Users,
    Settings,
}

impl Section {
    pub const MENU: [Section; 6] = [
        Section::Dashboard,
        Section::Products,
        Section::StockIn,
        Section::Sales,
        Section::Users,
        Section::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Products => "Products",
            Section::StockIn => "Stock In",
            Section::Sales => "Sales",
            Section::Users => "Users",
            Section::Settings => "Settings",
        }
    }

    pub fn required_permission(&self) -> Permission {
        match self {
            Section::Dashboard => Permission::VIEW_DASHBOARD,
            Section::Products => Permission::VIEW_PRODUCTS,
            Section::StockIn => Permission::VIEW_STOCK_IN,
            Section::Sales => Permission::VIEW_SALES,
            Section::Users => Permission::VIEW_USERS,
            Section::Settings => Permission::VIEW_SETTINGS,
        }
    }
}

/// Sections visible to `role`, in menu order.
pub fn navigation(role: Role) -> Vec<Section> {
    Section::MENU
        .into_iter()
        .filter(|s| s.required_permission().granted_to(role))
        .collect()
}
