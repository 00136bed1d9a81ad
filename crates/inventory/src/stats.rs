//! Derived views over products and sales.
//!
//! Everything here is a pure function of the collections it is handed; nothing
//! is cached, so results always match the current state.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{Money, ProductId, find_by_id};

use crate::product::Product;
use crate::sale::Sale;

/// Number of entries in the top sellers ranking.
pub const TOP_SELLERS_LIMIT: usize = 5;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_products: usize,
    pub total_sales: Money,
    pub total_profit: Money,
    pub today_sales: Money,
    pub today_profit: Money,
}

/// Revenue for one calendar month, labelled like `"December 2024"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Money,
}

/// One row of the top sellers ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSeller {
    pub product_id: ProductId,
    pub product: String,
    pub quantity: u64,
    pub revenue: Money,
}

/// Products at or below their stock threshold, in collection order.
pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_low_stock()).cloned().collect()
}

/// Sum of sale revenue per calendar month, oldest month first.
pub fn monthly_revenue(sales: &[Sale], tz: FixedOffset) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<(i32, u32), Money> = BTreeMap::new();
    for sale in sales {
        let local = sale.sale_date.with_timezone(&tz);
        *by_month.entry((local.year(), local.month())).or_default() += sale.total_amount;
    }

    by_month
        .into_iter()
        .filter_map(|((year, month), revenue)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyRevenue {
                month: month_label(first),
                revenue,
            })
        })
        .collect()
}

/// Human-readable month label, e.g. `"November 2024"`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Best-selling products by total quantity, highest first.
///
/// The display name comes from the first sale seen for each product. Products
/// with equal quantities keep the order in which they first appear in `sales`.
pub fn most_sold(sales: &[Sale], limit: usize) -> Vec<TopSeller> {
    let mut rows: Vec<TopSeller> = Vec::new();
    let mut index: HashMap<&ProductId, usize> = HashMap::new();

    for sale in sales {
        let slot = *index.entry(&sale.product_id).or_insert_with(|| {
            rows.push(TopSeller {
                product_id: sale.product_id.clone(),
                product: sale.product_name.clone(),
                quantity: 0,
                revenue: Money::ZERO,
            });
            rows.len() - 1
        });
        rows[slot].quantity += sale.quantity;
        rows[slot].revenue += sale.total_amount;
    }

    // Stable sort: ties stay in first-appearance order.
    rows.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    rows.truncate(limit);
    rows
}

/// Profit for one sale using the product's *current* margin.
///
/// Repricing a product after the sale changes this figure. Sales whose product
/// is no longer in the catalog contribute nothing.
pub fn sale_profit(products: &[Product], sale: &Sale) -> Money {
    find_by_id(products, &sale.product_id)
        .map(|p| p.margin * sale.quantity)
        .unwrap_or(Money::ZERO)
}

/// Whether `at` falls on the same calendar day as `now` in `tz`.
pub fn same_day(at: DateTime<Utc>, now: DateTime<Utc>, tz: FixedOffset) -> bool {
    at.with_timezone(&tz).date_naive() == now.with_timezone(&tz).date_naive()
}

/// Compute dashboard statistics as of `now`.
pub fn dashboard_stats(
    products: &[Product],
    sales: &[Sale],
    now: DateTime<Utc>,
    tz: FixedOffset,
) -> DashboardStats {
    let today: Vec<&Sale> = sales
        .iter()
        .filter(|s| same_day(s.sale_date, now, tz))
        .collect();

    DashboardStats {
        total_products: products.len(),
        low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
        total_sales: sales.iter().map(|s| s.total_amount).sum(),
        total_profit: sales.iter().map(|s| sale_profit(products, s)).sum(),
        today_sales: today.iter().map(|s| s.total_amount).sum(),
        today_profit: today.iter().map(|s| sale_profit(products, s)).sum(),
    }
}
