use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{Entity, MovementId, ProductId};

/// Why the stock level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    StockIn,
    Sale,
}

/// Append-only ledger entry for a stock level change.
///
/// `quantity` is a signed delta: negative for sales, positive for stock-in.
/// `new_stock == previous_stock + quantity` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub previous_stock: u64,
    pub new_stock: u64,
    pub performed_by: String,
    pub date: DateTime<Utc>,
}

impl StockMovement {
    pub fn is_stock_in(&self) -> bool {
        self.kind == MovementKind::StockIn
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fold a product's movements forward from an opening balance.
///
/// Returns `None` if the ledger would take stock below zero, which a
/// consistent ledger never does.
pub fn replay<'a, I>(opening: u64, movements: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a StockMovement>,
{
    movements
        .into_iter()
        .try_fold(opening, |stock, m| stock.checked_add_signed(m.quantity))
}
