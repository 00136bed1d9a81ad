//! Demo entry point: seed the store, log in, print what that user's dashboard shows.

mod config;

use anyhow::{Context, Result};
use serde::Serialize;

use elegante_auth::{Section, User, UserDirectory, navigation};
use elegante_inventory::InventoryStore;
use elegante_reporting::{
    CatalogView, DashboardView, InventoryReport, MemoryExporter, SalesListRow, export_report,
    sales_list,
};

use crate::config::AppConfig;

#[derive(Serialize)]
struct Screen<'a> {
    user: &'a User,
    navigation: Vec<Section>,
    dashboard: DashboardView,
    catalog: Option<CatalogView>,
    sales: Vec<SalesListRow>,
    report: Option<InventoryReport>,
}

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    elegante_observability::init(&config.observability);
    if config.demo_login {
        tracing::warn!(
            "{}/{} not set; using demo owner account",
            config::LOGIN_EMAIL,
            config::LOGIN_PASSWORD
        );
    }

    let directory = UserDirectory::demo();
    let user = directory
        .login(&config.login_email, &config.login_password)
        .context("login failed")?;

    let store = InventoryStore::seeded(elegante_core::SystemClock).with_timezone(config.timezone);
    tracing::info!(
        products = store.products().len(),
        sales = store.sales().len(),
        "store seeded"
    );

    let report = if config.include_report {
        let exporter = MemoryExporter::new();
        export_report(user, &store, &exporter).context("report export")?;
        exporter.exported().into_iter().next().map(|(_, report)| report)
    } else {
        None
    };

    let screen = Screen {
        user,
        navigation: navigation(user.role),
        dashboard: DashboardView::for_user(user, &store),
        catalog: CatalogView::for_user(user, &store).ok(),
        sales: sales_list(user, &store),
        report,
    };

    println!("{}", serde_json::to_string_pretty(&screen)?);
    Ok(())
}
