//! Products page: the catalog plus which product actions the user may take.

use serde::Serialize;

use elegante_auth::{AuthzError, Permission, User, authorize};
use elegante_core::{Clock, Money, ProductId};
use elegante_inventory::{InventoryStore, Product};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub selling_price: Money,
    /// Hidden from users without `view.profits`.
    pub buying_price: Option<Money>,
    pub margin: Option<Money>,
    pub stock: u64,
    pub stock_threshold: u64,
    pub low_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    /// "Add Product" is offered.
    pub can_create: bool,
    /// Price fields are editable in the product form.
    pub can_edit_pricing: bool,
    pub products: Vec<CatalogRow>,
}

impl CatalogView {
    /// Requires `view.products`.
    pub fn for_user<C: Clock>(user: &User, store: &InventoryStore<C>) -> Result<Self, AuthzError> {
        authorize(user, &Permission::VIEW_PRODUCTS)?;
        let show_costs = Permission::VIEW_PROFITS.granted_to(user.role);

        let products = store
            .products()
            .iter()
            .map(|p: &Product| CatalogRow {
                product_id: p.id.clone(),
                name: p.name.clone(),
                category: p.category.clone(),
                selling_price: p.selling_price,
                buying_price: show_costs.then_some(p.buying_price),
                margin: show_costs.then_some(p.margin),
                stock: p.stock,
                stock_threshold: p.stock_threshold,
                low_stock: p.is_low_stock(),
            })
            .collect();

        Ok(Self {
            can_create: Permission::PRODUCTS_CREATE.granted_to(user.role),
            can_edit_pricing: Permission::PRODUCTS_EDIT_PRICING.granted_to(user.role),
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use elegante_auth::{Role, UserDirectory};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 15, 0, 0).unwrap()
    }

    fn catalog_as(role: Role) -> Result<CatalogView, AuthzError> {
        let directory = UserDirectory::demo();
        let user = directory.switch_role(role).unwrap();
        CatalogView::for_user(user, &InventoryStore::seeded(now as fn() -> DateTime<Utc>))
    }

    #[test]
    fn owner_can_create_and_reprice() {
        let view = catalog_as(Role::SuperAdmin).unwrap();
        assert!(view.can_create);
        assert!(view.can_edit_pricing);
        assert_eq!(view.products.len(), 3);
        assert_eq!(view.products[0].margin, Some(Money::new(4_000)));
        assert!(view.products[0].low_stock);
        assert!(!view.products[1].low_stock);
    }

    #[test]
    fn manager_sees_costs_but_cannot_create_or_reprice() {
        let view = catalog_as(Role::Admin).unwrap();
        assert!(!view.can_create);
        assert!(!view.can_edit_pricing);
        assert_eq!(view.products[2].buying_price, Some(Money::new(800)));
    }

    #[test]
    fn sales_staff_has_no_products_page() {
        let err = catalog_as(Role::SalesStaff).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden(Permission::VIEW_PRODUCTS.as_str().to_string()));
    }
}
