//! Read-side projections of the inventory store.
//!
//! - [`report`]: the four tabular sheets handed to a spreadsheet exporter.
//! - [`dashboard`]: role-gated dashboard and sales list views.
//! - [`catalog`]: products page with the actions a role may take.

pub mod catalog;
pub mod dashboard;
pub mod report;

pub use catalog::{CatalogRow, CatalogView};
pub use dashboard::{DashboardView, RecentSale, SalesListRow, sales_list};
pub use report::{
    ExportError, InventoryReport, MemoryExporter, ReportExporter, Sheet, export_report,
    report_file_name,
};
