use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Catalog entry with its current stock level.
///
/// `margin` is derived from the two prices and is never set directly; every
/// path that touches a price goes through [`Product::apply_update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub buying_price: Money,
    pub selling_price: Money,
    pub margin: Money,
    pub stock: u64,
    pub stock_threshold: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from validated input.
    pub fn create(id: ProductId, input: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            margin: input.selling_price - input.buying_price,
            name: input.name,
            category: input.category,
            buying_price: input.buying_price,
            selling_price: input.selling_price,
            stock: input.stock,
            stock_threshold: input.stock_threshold,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stock at or below the configured threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_threshold
    }

    /// Apply a partial update, recomputing the margin when a price is present.
    pub fn apply_update(&mut self, update: &ProductUpdate, now: DateTime<Utc>) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(price) = update.buying_price {
            self.buying_price = price;
        }
        if let Some(price) = update.selling_price {
            self.selling_price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(threshold) = update.stock_threshold {
            self.stock_threshold = threshold;
        }
        if update.touches_pricing() {
            self.margin = self.selling_price - self.buying_price;
        }
        self.updated_at = now;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub buying_price: Money,
    pub selling_price: Money,
    pub stock: u64,
    pub stock_threshold: u64,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        validate_price("buying_price", self.buying_price)?;
        validate_price("selling_price", self.selling_price)?;
        validate_threshold(self.stock_threshold)
    }
}

/// Partial update for a product. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub buying_price: Option<Money>,
    pub selling_price: Option<Money>,
    pub stock: Option<u64>,
    pub stock_threshold: Option<u64>,
}

impl ProductUpdate {
    pub fn stock(stock: u64) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub fn pricing(buying_price: Money, selling_price: Money) -> Self {
        Self {
            buying_price: Some(buying_price),
            selling_price: Some(selling_price),
            ..Self::default()
        }
    }

    pub fn touches_pricing(&self) -> bool {
        self.buying_price.is_some() || self.selling_price.is_some()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(DomainError::validation("category cannot be empty"));
            }
        }
        if let Some(price) = self.buying_price {
            validate_price("buying_price", price)?;
        }
        if let Some(price) = self.selling_price {
            validate_price("selling_price", price)?;
        }
        if let Some(threshold) = self.stock_threshold {
            validate_threshold(threshold)?;
        }
        Ok(())
    }
}

fn validate_price(field: &str, price: Money) -> DomainResult<()> {
    if price.is_negative() {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

fn validate_threshold(threshold: u64) -> DomainResult<()> {
    if threshold == 0 {
        return Err(DomainError::validation("stock_threshold must be positive"));
    }
    Ok(())
}
