use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Role;

/// Permission identifier.
///
/// Permissions are opaque dotted strings (e.g. `"view.profits"`). The set
/// each role holds is fixed by [`Permission::granted_to`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const VIEW_DASHBOARD: Permission = Permission::named("view.dashboard");
    pub const VIEW_PRODUCTS: Permission = Permission::named("view.products");
    pub const VIEW_STOCK_IN: Permission = Permission::named("view.stock_in");
    pub const VIEW_SALES: Permission = Permission::named("view.sales");
    pub const VIEW_USERS: Permission = Permission::named("view.users");
    pub const VIEW_SETTINGS: Permission = Permission::named("view.settings");
    pub const VIEW_PROFITS: Permission = Permission::named("view.profits");
    pub const VIEW_ANALYTICS: Permission = Permission::named("view.analytics");
    pub const PRODUCTS_CREATE: Permission = Permission::named("products.create");
    pub const PRODUCTS_EDIT_PRICING: Permission = Permission::named("products.edit_pricing");
    pub const REPORTS_EXPORT: Permission = Permission::named("reports.export");

    const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `role` holds this permission.
    pub fn granted_to(&self, role: Role) -> bool {
        role_permissions(role).iter().any(|p| p == self)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

const EVERYONE: &[Permission] = &[
    Permission::VIEW_DASHBOARD,
    Permission::VIEW_SALES,
    Permission::VIEW_SETTINGS,
];

const MANAGERS: &[Permission] = &[
    Permission::VIEW_DASHBOARD,
    Permission::VIEW_SALES,
    Permission::VIEW_SETTINGS,
    Permission::VIEW_PRODUCTS,
    Permission::VIEW_STOCK_IN,
    Permission::VIEW_PROFITS,
];

const OWNERS: &[Permission] = &[
    Permission::VIEW_DASHBOARD,
    Permission::VIEW_SALES,
    Permission::VIEW_SETTINGS,
    Permission::VIEW_PRODUCTS,
    Permission::VIEW_STOCK_IN,
    Permission::VIEW_PROFITS,
    Permission::VIEW_USERS,
    Permission::VIEW_ANALYTICS,
    Permission::PRODUCTS_CREATE,
    Permission::PRODUCTS_EDIT_PRICING,
    Permission::REPORTS_EXPORT,
];

/// Permissions held by a role.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::SuperAdmin => OWNERS,
        Role::Admin => MANAGERS,
        Role::SalesStaff => EVERYONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profits_are_hidden_from_sales_staff() {
        assert!(Permission::VIEW_PROFITS.granted_to(Role::SuperAdmin));
        assert!(Permission::VIEW_PROFITS.granted_to(Role::Admin));
        assert!(!Permission::VIEW_PROFITS.granted_to(Role::SalesStaff));
    }

    #[test]
    fn only_super_admin_exports_and_prices() {
        for perm in [
            Permission::REPORTS_EXPORT,
            Permission::VIEW_ANALYTICS,
            Permission::PRODUCTS_CREATE,
            Permission::PRODUCTS_EDIT_PRICING,
            Permission::VIEW_USERS,
        ] {
            assert!(perm.granted_to(Role::SuperAdmin));
            assert!(!perm.granted_to(Role::Admin));
            assert!(!perm.granted_to(Role::SalesStaff));
        }
    }

    #[test]
    fn every_role_sees_dashboard() {
        for role in Role::ALL {
            assert!(Permission::VIEW_DASHBOARD.granted_to(role));
        }
    }

    #[test]
    fn dynamic_permission_compares_by_name() {
        assert!(Permission::new("view.sales".to_string()).granted_to(Role::SalesStaff));
    }
}
