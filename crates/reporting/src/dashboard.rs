//! Role-gated dashboard and sales list.
//!
//! Fields a role may not see are `None` rather than zero, so a renderer can
//! tell "hidden" apart from "nothing sold".

use chrono::{DateTime, Utc};
use serde::Serialize;

use elegante_auth::{Permission, User};
use elegante_core::{Clock, Money, ProductId, SaleId};
use elegante_inventory::{InventoryStore, MonthlyRevenue, Product, Sale, TopSeller};

/// Number of sales listed under "Recent Sales".
pub const RECENT_SALES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSale {
    pub sale_id: SaleId,
    pub product: String,
    pub quantity: u64,
    pub amount: Money,
    pub profit: Option<Money>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub product_id: ProductId,
    pub name: String,
    pub stock: u64,
    pub stock_threshold: u64,
}

impl From<&Product> for LowStockAlert {
    fn from(p: &Product) -> Self {
        Self {
            product_id: p.id.clone(),
            name: p.name.clone(),
            stock: p.stock,
            stock_threshold: p.stock_threshold,
        }
    }
}

/// Analytics block shown to users with `view.analytics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub total_sales: Money,
    pub total_profit: Money,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub top_sellers: Vec<TopSeller>,
}

/// What the dashboard shows to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub today_sales: Money,
    pub today_profit: Option<Money>,
    pub low_stock: Vec<LowStockAlert>,
    pub recent_sales: Vec<RecentSale>,
    pub analytics: Option<Analytics>,
}

impl DashboardView {
    pub fn for_user<C: Clock>(user: &User, store: &InventoryStore<C>) -> Self {
        let show_profit = Permission::VIEW_PROFITS.granted_to(user.role);
        let show_analytics = Permission::VIEW_ANALYTICS.granted_to(user.role);
        let stats = store.dashboard_stats();

        let recent_sales = store
            .recent_sales(RECENT_SALES)
            .iter()
            .map(|sale| RecentSale {
                sale_id: sale.id.clone(),
                product: sale.product_name.clone(),
                quantity: sale.quantity,
                amount: sale.total_amount,
                profit: show_profit.then(|| store.sale_profit(sale)),
                date: sale.sale_date,
            })
            .collect();

        let analytics = show_analytics.then(|| Analytics {
            total_sales: stats.total_sales,
            total_profit: stats.total_profit,
            monthly_revenue: store.monthly_revenue(),
            top_sellers: store.most_sold_products(),
        });

        Self {
            total_products: stats.total_products,
            low_stock_count: stats.low_stock_products,
            today_sales: stats.today_sales,
            today_profit: show_profit.then_some(stats.today_profit),
            low_stock: store.low_stock_products().iter().map(LowStockAlert::from).collect(),
            recent_sales,
            analytics,
        }
    }
}

/// One row of the sales list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesListRow {
    pub sale_id: SaleId,
    pub product: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub total_amount: Money,
    pub profit: Option<Money>,
    pub sold_by: String,
    pub sale_date: DateTime<Utc>,
}

/// All sales as the given user may see them.
pub fn sales_list<C: Clock>(user: &User, store: &InventoryStore<C>) -> Vec<SalesListRow> {
    let show_profit = Permission::VIEW_PROFITS.granted_to(user.role);
    store
        .sales()
        .iter()
        .map(|sale: &Sale| SalesListRow {
            sale_id: sale.id.clone(),
            product: sale.product_name.clone(),
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            total_amount: sale.total_amount,
            profit: show_profit.then(|| store.sale_profit(sale)),
            sold_by: sale.sold_by.clone(),
            sale_date: sale.sale_date,
        })
        .collect()
}
