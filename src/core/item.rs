//! Catalog item and variant records

use crate::core::field::FieldValue;
use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a catalog item
///
/// The admin product table uses `active`/`draft`/`archived`, the user
/// table uses `active`/`inactive`; both share this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    Draft,
    Archived,
    Inactive,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Draft => "draft",
            ItemStatus::Archived => "archived",
            ItemStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One purchasable variant of an item (e.g. a 20L or 35L bag)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
}

impl Variant {
    /// Create a variant with only a capacity
    pub fn with_capacity(capacity: impl Into<String>) -> Self {
        Self {
            capacity: Some(capacity.into()),
            ..Self::default()
        }
    }

    /// Read a text attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "capacity" => self.capacity.as_deref(),
            "color" => self.color.as_deref(),
            "sku" => self.sku.as_deref(),
            _ => None,
        }
    }
}

/// A product record as fetched from the data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,

    /// Variant list as exposed to the storefront
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,

    /// Variant list as stored by the admin import
    #[serde(default)]
    pub variant_options: Option<Vec<Variant>>,
}

impl Item {
    /// Create a new active item with a fresh id and no optional fields
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sku: None,
            category: None,
            brand: None,
            price: price.max(0.0),
            stock: 0,
            status: ItemStatus::Active,
            created_at: Utc::now(),
            variants: None,
            variant_options: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = Some(variants);
        self
    }

    pub fn with_variant_options(mut self, options: Vec<Variant>) -> Self {
        self.variant_options = Some(options);
        self
    }

    /// The single logical variant list of this item
    ///
    /// Union of `variants` and `variant_options`: storefront variants come
    /// first, then admin options that are not already present.
    pub fn variant_list(&self) -> Vec<&Variant> {
        let mut list: Vec<&Variant> = self.variants.iter().flatten().collect();
        for option in self.variant_options.iter().flatten() {
            if !list.contains(&option) {
                list.push(option);
            }
        }
        list
    }
}

impl Record for Item {
    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "name" => Some(FieldValue::Text(&self.name)),
            "sku" => self.sku.as_deref().map(FieldValue::Text),
            "category" => self.category.as_deref().map(FieldValue::Text),
            "brand" => self.brand.as_deref().map(FieldValue::Text),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "price" => Some(FieldValue::Number(self.price)),
            "stock" => Some(FieldValue::Integer(i64::from(self.stock))),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            _ => None,
        }
    }

    fn variants(&self) -> Vec<&Variant> {
        self.variant_list()
    }
}
