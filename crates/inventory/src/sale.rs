use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{Entity, Money, ProductId, SaleId};

use crate::product::Product;

/// A recorded sale.
///
/// Product name and unit price are copied at the time of sale so later catalog
/// edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub total_amount: Money,
    pub sold_by: String,
    pub sale_date: DateTime<Utc>,
}

impl Sale {
    pub fn record(
        id: SaleId,
        product: &Product,
        quantity: u64,
        sold_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.selling_price,
            total_amount: product.selling_price * quantity,
            sold_by: sold_by.into(),
            sale_date: now,
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
