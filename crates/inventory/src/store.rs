use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, info, warn};

use elegante_core::{
    Clock, DomainError, DomainResult, Money, MovementId, ProductId, SaleId, SystemClock,
    find_by_id, find_by_id_mut,
};

use crate::movement::{self, MovementKind, StockMovement};
use crate::product::{NewProduct, Product, ProductUpdate};
use crate::sale::Sale;
use crate::seed;
use crate::stats::{self, DashboardStats, MonthlyRevenue, TopSeller, TOP_SELLERS_LIMIT};

/// Default business timezone: East Africa Time (UTC+3, no DST).
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// In-memory inventory: the single owner of products, sales and the stock
/// movement ledger.
///
/// Every mutating operation takes `&mut self` and either applies all of its
/// effects or none of them. Calendar-day and calendar-month grouping uses the
/// store's business timezone.
#[derive(Debug, Clone)]
pub struct InventoryStore<C = SystemClock> {
    products: Vec<Product>,
    sales: Vec<Sale>,
    movements: Vec<StockMovement>,
    clock: C,
    timezone: FixedOffset,
}

impl Default for InventoryStore<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> InventoryStore<C> {
    /// Empty store.
    pub fn new(clock: C) -> Self {
        Self {
            products: Vec::new(),
            sales: Vec::new(),
            movements: Vec::new(),
            clock,
            timezone: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Store pre-populated with the demo catalog and sales history.
    pub fn seeded(clock: C) -> Self {
        let mut store = Self::new(clock);
        store.products = seed::products();
        store.sales = seed::sales(&store.products);
        store
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Add a product to the catalog and return it.
    pub fn add_product(&mut self, input: NewProduct) -> DomainResult<Product> {
        input.validate()?;
        let product = Product::create(ProductId::generate(), input, self.clock.now());
        info!(product_id = %product.id, name = %product.name, "product created");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// Fails with [`DomainError::NotFound`] for an unknown id and leaves the
    /// store untouched.
    pub fn update_product(&mut self, id: &ProductId, update: ProductUpdate) -> DomainResult<Product> {
        update.validate()?;
        let now = self.clock.now();
        let product = self.product_mut(id)?;
        product.apply_update(&update, now);
        debug!(product_id = %id, "product updated");
        Ok(product.clone())
    }

    /// Record a sale of `quantity` units.
    ///
    /// On success the sale is appended, the product's stock is decremented and
    /// a `sale` movement is appended. On failure nothing changes.
    pub fn add_sale(
        &mut self,
        product_id: &ProductId,
        quantity: u64,
        sold_by: &str,
    ) -> DomainResult<Sale> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let now = self.clock.now();
        let product = self.product(product_id).ok_or_else(|| {
            warn!(product_id = %product_id, "sale rejected: unknown product");
            DomainError::not_found()
        })?;

        if quantity > product.stock {
            warn!(
                product_id = %product_id,
                requested = quantity,
                available = product.stock,
                "sale rejected: insufficient stock"
            );
            return Err(DomainError::insufficient_stock(quantity, product.stock));
        }

        let delta = signed(quantity)?;
        let previous = product.stock;
        let new_stock = previous - quantity;
        let sale = Sale::record(SaleId::generate(), product, quantity, sold_by, now);
        let entry = StockMovement {
            id: MovementId::generate(),
            product_id: product_id.clone(),
            product_name: product.name.clone(),
            kind: MovementKind::Sale,
            quantity: -delta,
            previous_stock: previous,
            new_stock,
            performed_by: sold_by.to_string(),
            date: now,
        };

        // All checks passed; apply the three effects together.
        self.product_mut(product_id)?
            .apply_update(&ProductUpdate::stock(new_stock), now);
        self.sales.push(sale.clone());
        self.movements.push(entry);

        info!(
            product_id = %product_id,
            quantity,
            total = %sale.total_amount,
            actor = sold_by,
            "sale recorded"
        );
        Ok(sale)
    }

    /// Receive `quantity` units into stock and return the ledger entry.
    pub fn add_stock(
        &mut self,
        product_id: &ProductId,
        quantity: u64,
        performed_by: &str,
    ) -> DomainResult<StockMovement> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let now = self.clock.now();
        let product = self.product(product_id).ok_or_else(|| {
            warn!(product_id = %product_id, "stock-in rejected: unknown product");
            DomainError::not_found()
        })?;

        let delta = signed(quantity)?;
        let previous = product.stock;
        let new_stock = previous
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock overflow"))?;
        let entry = StockMovement {
            id: MovementId::generate(),
            product_id: product_id.clone(),
            product_name: product.name.clone(),
            kind: MovementKind::StockIn,
            quantity: delta,
            previous_stock: previous,
            new_stock,
            performed_by: performed_by.to_string(),
            date: now,
        };

        self.product_mut(product_id)?
            .apply_update(&ProductUpdate::stock(new_stock), now);
        self.movements.push(entry.clone());

        info!(product_id = %product_id, quantity, actor = performed_by, "stock received");
        Ok(entry)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn stock_movements(&self) -> &[StockMovement] {
        &self.movements
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    /// Products with stock at or below their threshold, in catalog order.
    pub fn low_stock_products(&self) -> Vec<Product> {
        stats::low_stock(&self.products)
    }

    /// Products that can currently be sold (stock > 0).
    pub fn sellable_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.stock > 0).collect()
    }

    pub fn stock_in_movements(&self) -> Vec<&StockMovement> {
        self.movements.iter().filter(|m| m.is_stock_in()).collect()
    }

    /// Ledger entries for one product, in the order they were appended.
    pub fn stock_history(&self, product_id: &ProductId) -> Vec<&StockMovement> {
        self.movements
            .iter()
            .filter(|m| &m.product_id == product_id)
            .collect()
    }

    /// Stock level obtained by replaying a product's ledger from `opening`.
    ///
    /// The ledger only records sales and stock-in, so a direct stock edit via
    /// [`update_product`](Self::update_product) breaks the chain. Returns
    /// `None` when the replayed level does not match the product's current
    /// stock, or when the product is unknown.
    pub fn replay_stock(&self, product_id: &ProductId, opening: u64) -> Option<u64> {
        let current = self.product(product_id)?.stock;
        let replayed = movement::replay(opening, self.stock_history(product_id))?;
        if replayed != current {
            warn!(product_id = %product_id, replayed, current, "stock ledger out of sync");
            return None;
        }
        Some(replayed)
    }

    /// The first `n` sales in recording order.
    pub fn recent_sales(&self, n: usize) -> &[Sale] {
        &self.sales[..n.min(self.sales.len())]
    }

    pub fn sale_profit(&self, sale: &Sale) -> Money {
        stats::sale_profit(&self.products, sale)
    }

    pub fn monthly_revenue(&self) -> Vec<MonthlyRevenue> {
        let rows = stats::monthly_revenue(&self.sales, self.timezone);
        debug!(months = rows.len(), "monthly revenue computed");
        rows
    }

    /// Top five products by quantity sold.
    pub fn most_sold_products(&self) -> Vec<TopSeller> {
        stats::most_sold(&self.sales, TOP_SELLERS_LIMIT)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        stats::dashboard_stats(&self.products, &self.sales, self.clock.now(), self.timezone)
    }

    fn product_mut(&mut self, id: &ProductId) -> DomainResult<&mut Product> {
        find_by_id_mut(&mut self.products, id).ok_or_else(|| {
            warn!(product_id = %id, "unknown product");
            DomainError::not_found()
        })
    }
}

fn signed(quantity: u64) -> DomainResult<i64> {
    i64::try_from(quantity).map_err(|_| DomainError::validation("quantity out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap()
    }

    type TestStore = InventoryStore<fn() -> DateTime<Utc>>;

    fn store() -> TestStore {
        InventoryStore::new(fixed_now as fn() -> DateTime<Utc>).with_timezone(Utc.fix())
    }

    fn product(name: &str, selling: i64, stock: u64, threshold: u64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Suits".to_string(),
            buying_price: Money::new(selling / 2),
            selling_price: Money::new(selling),
            stock,
            stock_threshold: threshold,
        }
    }

    #[test]
    fn stock_in_clears_low_stock() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 5, 10)).unwrap();
        assert_eq!(s.low_stock_products(), vec![p.clone()]);

        let m = s.add_stock(&p.id, 10, "Jane Smith").unwrap();
        assert_eq!(s.product(&p.id).unwrap().stock, 15);
        assert!(s.low_stock_products().is_empty());
        assert_eq!(m.kind, MovementKind::StockIn);
        assert_eq!((m.quantity, m.previous_stock, m.new_stock), (10, 5, 15));
        assert_eq!(s.stock_movements(), &[m]);
    }

    #[test]
    fn oversell_is_rejected_without_side_effects() {
        let mut s = store();
        let q = s.add_product(product("Q", 100, 3, 1)).unwrap();
        let before = s.clone();

        let err = s.add_sale(&q.id, 5, "Alice").unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(5, 3));
        assert_eq!(s.product(&q.id).unwrap().stock, 3);
        assert!(s.sales().is_empty());
        assert!(s.stock_movements().is_empty());
        assert_eq!(s.products(), before.products());
    }

    #[test]
    fn sale_applies_all_effects() {
        let mut s = store();
        let r = s.add_product(product("R", 100, 10, 1)).unwrap();

        let sale = s.add_sale(&r.id, 2, "Bob").unwrap();
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.unit_price, Money::new(100));
        assert_eq!(sale.total_amount, Money::new(200));
        assert_eq!(sale.sold_by, "Bob");
        assert_eq!(s.sales(), &[sale]);
        assert_eq!(s.product(&r.id).unwrap().stock, 8);

        let m = &s.stock_movements()[0];
        assert_eq!(m.kind, MovementKind::Sale);
        assert_eq!((m.quantity, m.previous_stock, m.new_stock), (-2, 10, 8));
    }

    #[test]
    fn selling_entire_stock_is_allowed() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 4, 1)).unwrap();
        s.add_sale(&p.id, 4, "Bob").unwrap();
        assert_eq!(s.product(&p.id).unwrap().stock, 0);
        assert!(s.sellable_products().is_empty());
    }

    #[test]
    fn unknown_product_is_not_found() {
        let mut s = store();
        let missing = ProductId::from("missing");
        assert_eq!(s.add_sale(&missing, 1, "Bob").unwrap_err(), DomainError::NotFound);
        assert_eq!(s.add_stock(&missing, 1, "Bob").unwrap_err(), DomainError::NotFound);
        assert_eq!(
            s.update_product(&missing, ProductUpdate::stock(1)).unwrap_err(),
            DomainError::NotFound
        );
        assert!(s.stock_movements().is_empty());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 4, 1)).unwrap();
        assert!(matches!(s.add_sale(&p.id, 0, "Bob"), Err(DomainError::Validation(_))));
        assert!(matches!(s.add_stock(&p.id, 0, "Bob"), Err(DomainError::Validation(_))));
        assert!(s.stock_movements().is_empty());
    }

    #[test]
    fn update_recomputes_margin() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 4, 1)).unwrap();
        let updated = s
            .update_product(&p.id, ProductUpdate::pricing(Money::new(30), Money::new(90)))
            .unwrap();
        assert_eq!(updated.margin, Money::new(60));
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 4, 1)).unwrap();

        let err = s
            .update_product(
                &p.id,
                ProductUpdate {
                    name: Some("X".to_string()),
                    buying_price: Some(Money::new(-1)),
                    ..ProductUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(s.product(&p.id), Some(&p));
    }

    #[test]
    fn update_rejects_zero_threshold_and_blank_name() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 4, 1)).unwrap();

        let zero_threshold = ProductUpdate {
            stock_threshold: Some(0),
            ..ProductUpdate::default()
        };
        let blank_name = ProductUpdate {
            name: Some("   ".to_string()),
            ..ProductUpdate::default()
        };
        for update in [zero_threshold, blank_name] {
            assert!(matches!(
                s.update_product(&p.id, update),
                Err(DomainError::Validation(_))
            ));
        }
        assert_eq!(s.product(&p.id), Some(&p));
    }

    #[test]
    fn invalid_product_is_not_added() {
        let mut s = store();
        let mut blank = product("P", 100, 4, 1);
        blank.name = " ".to_string();
        let no_threshold = product("Q", 100, 4, 0);
        let mut below_zero = product("R", 100, 4, 1);
        below_zero.selling_price = Money::new(-5);

        for input in [blank, no_threshold, below_zero] {
            assert!(matches!(s.add_product(input), Err(DomainError::Validation(_))));
        }
        assert!(s.products().is_empty());
    }

    #[test]
    fn direct_stock_edit_breaks_replay() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 5, 1)).unwrap();
        s.add_stock(&p.id, 10, "Jane").unwrap();
        assert_eq!(s.replay_stock(&p.id, 5), Some(15));

        s.update_product(&p.id, ProductUpdate::stock(40)).unwrap();
        s.add_sale(&p.id, 2, "Mike").unwrap();
        assert_eq!(s.product(&p.id).unwrap().stock, 38);
        assert_eq!(s.stock_movements().len(), 2);
        assert_eq!(s.replay_stock(&p.id, 5), None);
    }

    #[test]
    fn replay_needs_the_right_opening_balance() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 5, 1)).unwrap();
        s.add_sale(&p.id, 3, "Mike").unwrap();
        assert_eq!(s.replay_stock(&p.id, 5), Some(2));
        assert_eq!(s.replay_stock(&p.id, 6), None);
        assert_eq!(s.replay_stock(&ProductId::from("missing"), 0), None);
    }

    #[test]
    fn profit_uses_current_margin() {
        let mut s = store();
        let p = s.add_product(product("P", 100, 10, 1)).unwrap();
        s.add_sale(&p.id, 2, "Bob").unwrap();
        assert_eq!(s.dashboard_stats().total_profit, Money::new(100));

        s.update_product(
            &p.id,
            ProductUpdate {
                buying_price: Some(Money::new(80)),
                ..ProductUpdate::default()
            },
        )
        .unwrap();
        let stats = s.dashboard_stats();
        assert_eq!(stats.total_profit, Money::new(40));
        assert_eq!(stats.today_profit, Money::new(40));
        assert_eq!(stats.today_sales, Money::new(200));
    }

    #[test]
    fn seeded_store_matches_demo_figures() {
        let s = InventoryStore::seeded(fixed_now as fn() -> DateTime<Utc>).with_timezone(Utc.fix());
        let stats = s.dashboard_stats();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.low_stock_products, 2);
        assert_eq!(stats.total_sales, Money::new(76_000));
        // 3 suits * 4000 + 5 shoes * 2500 + 5 ties * 700
        assert_eq!(stats.total_profit, Money::new(28_000));
        assert_eq!(stats.today_sales, Money::new(24_000));

        let months: Vec<String> = s.monthly_revenue().into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["October 2024", "November 2024", "December 2024"]);

        let top = s.most_sold_products();
        assert_eq!(top[0].product, "Leather Dress Shoes");
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[1].product, "Silk Tie Collection");
        assert_eq!(top[2].product, "Classic Black Suit");
    }

    #[test]
    fn recent_sales_is_bounded() {
        let s = InventoryStore::seeded(fixed_now as fn() -> DateTime<Utc>);
        assert_eq!(s.recent_sales(3).len(), 3);
        assert_eq!(s.recent_sales(50).len(), 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            StockIn(u64),
            Sale(u64),
            Reprice(i64, i64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1u64..50).prop_map(Op::StockIn),
                (1u64..50).prop_map(Op::Sale),
                (0i64..10_000, 0i64..10_000).prop_map(|(b, s)| Op::Reprice(b, s)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: stock never goes negative and equals opening + stock-in - sold.
            #[test]
            fn stock_is_conserved(opening in 0u64..100, ops in prop::collection::vec(op(), 0..40)) {
                let mut s = store();
                let p = s.add_product(product("P", 100, opening, 10)).unwrap();
                let mut received = 0u64;
                let mut sold = 0u64;

                for op in ops {
                    match op {
                        Op::StockIn(q) => {
                            s.add_stock(&p.id, q, "Jane").unwrap();
                            received += q;
                        }
                        Op::Sale(q) => {
                            let available = s.product(&p.id).unwrap().stock;
                            let sales_before = s.sales().len();
                            let moves_before = s.stock_movements().len();
                            match s.add_sale(&p.id, q, "Mike") {
                                Ok(_) => {
                                    prop_assert!(q <= available);
                                    sold += q;
                                    prop_assert_eq!(s.sales().len(), sales_before + 1);
                                    prop_assert_eq!(s.stock_movements().len(), moves_before + 1);
                                }
                                Err(e) => {
                                    prop_assert!(q > available);
                                    prop_assert_eq!(e, DomainError::insufficient_stock(q, available));
                                    prop_assert_eq!(s.product(&p.id).unwrap().stock, available);
                                    prop_assert_eq!(s.sales().len(), sales_before);
                                    prop_assert_eq!(s.stock_movements().len(), moves_before);
                                }
                            }
                        }
                        Op::Reprice(b, sp) => {
                            s.update_product(&p.id, ProductUpdate::pricing(Money::new(b), Money::new(sp))).unwrap();
                        }
                    }
                }

                let current = s.product(&p.id).unwrap().stock;
                prop_assert_eq!(current, opening + received - sold);
                prop_assert_eq!(s.replay_stock(&p.id, opening), Some(current));
            }

            /// Property: margin always equals selling - buying after any price update.
            #[test]
            fn margin_tracks_prices(
                updates in prop::collection::vec((prop::option::of(0i64..50_000), prop::option::of(0i64..50_000)), 1..20)
            ) {
                let mut s = store();
                let p = s.add_product(product("P", 100, 1, 1)).unwrap();
                for (buying, selling) in updates {
                    let update = ProductUpdate {
                        buying_price: buying.map(Money::new),
                        selling_price: selling.map(Money::new),
                        ..ProductUpdate::default()
                    };
                    let updated = s.update_product(&p.id, update).unwrap();
                    prop_assert_eq!(updated.margin, updated.selling_price - updated.buying_price);
                }
            }

            /// Property: low-stock list is exactly the products with stock <= threshold.
            #[test]
            fn low_stock_is_exact(
                catalog in prop::collection::vec((0u64..30, 1u64..30), 1..12),
                receipts in prop::collection::vec((0usize..12, 1u64..20), 0..20)
            ) {
                let mut s = store();
                let ids: Vec<ProductId> = catalog
                    .iter()
                    .enumerate()
                    .map(|(i, &(stock, threshold))| {
                        s.add_product(product(&format!("P{i}"), 100, stock, threshold)).unwrap().id
                    })
                    .collect();
                for (idx, qty) in receipts {
                    let id = &ids[idx % ids.len()];
                    s.add_stock(id, qty, "Jane").unwrap();
                }

                let expected: Vec<ProductId> = s
                    .products()
                    .iter()
                    .filter(|p| p.stock <= p.stock_threshold)
                    .map(|p| p.id.clone())
                    .collect();
                let actual: Vec<ProductId> = s.low_stock_products().into_iter().map(|p| p.id).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
