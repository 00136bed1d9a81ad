//! Tabular report views for spreadsheet export.
//!
//! Building the workbook file is the exporter's job; this module only fixes the
//! sheet names, the column order and the cell values.

use std::cell::RefCell;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use elegante_auth::{AuthzError, Permission, User, authorize};
use elegante_core::Clock;
use elegante_inventory::InventoryStore;

pub const SALES_SHEET: &str = "Sales";
pub const PRODUCTS_SHEET: &str = "Products";
pub const MONTHLY_REVENUE_SHEET: &str = "Monthly Revenue";
pub const TOP_PRODUCTS_SHEET: &str = "Top Products";

const SALES_COLUMNS: &[&str] = &[
    "Sale ID",
    "Product",
    "Quantity",
    "Unit Price (KSh)",
    "Total Amount (KSh)",
    "Sold By",
    "Date",
];

const PRODUCTS_COLUMNS: &[&str] = &[
    "Product Name",
    "Category",
    "Buying Price (KSh)",
    "Selling Price (KSh)",
    "Margin (KSh)",
    "Current Stock",
    "Stock Threshold",
];

const MONTHLY_COLUMNS: &[&str] = &["Month", "Revenue (KSh)"];

const TOP_PRODUCTS_COLUMNS: &[&str] = &["Product", "Quantity Sold", "Revenue (KSh)"];

/// One worksheet: a name, ordered column headers and rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

impl Sheet {
    fn new(name: &'static str, columns: &[&'static str]) -> Self {
        Self {
            name,
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Rows as field-name/value records, in column order.
    pub fn records(&self) -> Vec<Vec<(&'static str, &Value)>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().copied().zip(row.iter()).collect())
            .collect()
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row)?.get(idx)
    }
}

/// The full inventory report: Sales, Products, Monthly Revenue, Top Products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub generated_on: NaiveDate,
    pub sheets: Vec<Sheet>,
}

impl InventoryReport {
    pub fn build<C: Clock>(store: &InventoryStore<C>) -> Self {
        let tz: FixedOffset = store.timezone();

        let mut sales = Sheet::new(SALES_SHEET, SALES_COLUMNS);
        for sale in store.sales() {
            sales.rows.push(vec![
                json!(sale.id),
                json!(sale.product_name),
                json!(sale.quantity),
                json!(sale.unit_price),
                json!(sale.total_amount),
                json!(sale.sold_by),
                json!(sale.sale_date.with_timezone(&tz).date_naive().to_string()),
            ]);
        }

        let mut products = Sheet::new(PRODUCTS_SHEET, PRODUCTS_COLUMNS);
        for product in store.products() {
            products.rows.push(vec![
                json!(product.name),
                json!(product.category),
                json!(product.buying_price),
                json!(product.selling_price),
                json!(product.margin),
                json!(product.stock),
                json!(product.stock_threshold),
            ]);
        }

        let mut monthly = Sheet::new(MONTHLY_REVENUE_SHEET, MONTHLY_COLUMNS);
        for row in store.monthly_revenue() {
            monthly.rows.push(vec![json!(row.month), json!(row.revenue)]);
        }

        let mut top = Sheet::new(TOP_PRODUCTS_SHEET, TOP_PRODUCTS_COLUMNS);
        for row in store.most_sold_products() {
            top.rows
                .push(vec![json!(row.product), json!(row.quantity), json!(row.revenue)]);
        }

        Self {
            generated_on: store.clock().now().with_timezone(&tz).date_naive(),
            sheets: vec![sales, products, monthly, top],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn file_name(&self) -> String {
        report_file_name(self.generated_on)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `Gents_Elegante_Report_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Gents_Elegante_Report_{}.xlsx", date.format("%Y-%m-%d"))
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    #[error("exporter failed: {0}")]
    Sink(String),
}

/// Writes a report somewhere (spreadsheet library, download, ...).
pub trait ReportExporter {
    fn export(&self, file_name: &str, report: &InventoryReport) -> Result<(), ExportError>;
}

/// Exporter that keeps every report it receives; handy for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    exported: RefCell<Vec<(String, InventoryReport)>>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exported(&self) -> Vec<(String, InventoryReport)> {
        self.exported.borrow().clone()
    }
}

impl ReportExporter for MemoryExporter {
    fn export(&self, file_name: &str, report: &InventoryReport) -> Result<(), ExportError> {
        self.exported
            .borrow_mut()
            .push((file_name.to_string(), report.clone()));
        Ok(())
    }
}

/// Build the report and hand it to `exporter`, if `user` may export reports.
pub fn export_report<C, E>(
    user: &User,
    store: &InventoryStore<C>,
    exporter: &E,
) -> Result<String, ExportError>
where
    C: Clock,
    E: ReportExporter + ?Sized,
{
    authorize(user, &Permission::REPORTS_EXPORT)?;
    let report = InventoryReport::build(store);
    let file_name = report.file_name();
    exporter.export(&file_name, &report)?;
    tracing::info!(file = %file_name, user = %user.email, "report exported");
    Ok(file_name)
}
