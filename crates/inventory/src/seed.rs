//! Demo catalog and sales history used to populate a fresh store.

use chrono::{DateTime, TimeZone, Utc};

use elegante_core::{Money, ProductId, SaleId};

use crate::product::Product;
use crate::sale::Sale;

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    buying: i64,
    selling: i64,
    stock: u64,
    threshold: u64,
    day: u32,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed { id: "1", name: "Classic Black Suit", category: "Suits", buying: 8_000, selling: 12_000, stock: 5, threshold: 10, day: 1 },
    ProductSeed { id: "2", name: "Leather Dress Shoes", category: "Shoes", buying: 4_000, selling: 6_500, stock: 15, threshold: 8, day: 2 },
    ProductSeed { id: "3", name: "Silk Tie Collection", category: "Accessories", buying: 800, selling: 1_500, stock: 3, threshold: 12, day: 3 },
];

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|s| {
            let created = midnight(2024, 1, s.day);
            let buying = Money::new(s.buying);
            let selling = Money::new(s.selling);
            Product {
                id: ProductId::from(s.id),
                name: s.name.to_string(),
                category: s.category.to_string(),
                buying_price: buying,
                selling_price: selling,
                margin: selling - buying,
                stock: s.stock,
                stock_threshold: s.threshold,
                created_at: created,
                updated_at: created,
            }
        })
        .collect()
}

// (sale id, product id, quantity, seller, year, month, day)
const SALES: &[(&str, &str, u64, &str, i32, u32, u32)] = &[
    ("1", "1", 2, "Mike Johnson", 2024, 12, 1),
    ("2", "2", 3, "Mike Johnson", 2024, 12, 15),
    ("3", "1", 1, "Jane Smith", 2024, 11, 20),
    ("4", "3", 5, "Mike Johnson", 2024, 11, 10),
    ("5", "2", 2, "Jane Smith", 2024, 10, 25),
];

/// Historical sales for the demo catalog.
///
/// Priced from the catalog in [`products`]; the demo history predates the
/// movement ledger, so no stock movements accompany it.
pub fn sales(catalog: &[Product]) -> Vec<Sale> {
    SALES
        .iter()
        .filter_map(|&(id, product_id, quantity, seller, y, m, d)| {
            let product = catalog.iter().find(|p| p.id.as_str() == product_id)?;
            Some(Sale::record(
                SaleId::from(id),
                product,
                quantity,
                seller,
                midnight(y, m, d),
            ))
        })
        .collect()
}
