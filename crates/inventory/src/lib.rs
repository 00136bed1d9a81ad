//! Inventory domain module.
//!
//! Products, sales and the stock movement ledger, owned by a single
//! [`InventoryStore`], plus the aggregate views the dashboard reads. Pure
//! in-memory logic (no IO, no HTTP, no storage).

pub mod movement;
pub mod product;
pub mod sale;
pub mod seed;
pub mod stats;
pub mod store;

pub use movement::{MovementKind, StockMovement};
pub use product::{NewProduct, Product, ProductUpdate};
pub use sale::Sale;
pub use stats::{DashboardStats, MonthlyRevenue, TopSeller, TOP_SELLERS_LIMIT};
pub use store::{InventoryStore, DEFAULT_UTC_OFFSET_SECS};
