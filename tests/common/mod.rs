//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use storefront::prelude::*;

/// Install a test subscriber once; `RUST_LOG=storefront=debug` shows
/// recomputation logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A small bag catalog covering every facet
pub fn catalog() -> Vec<Item> {
    vec![
        Item::new("Campus Bag", 45.0)
            .with_sku("CB-01")
            .with_category("School bags")
            .with_brand("Skybags")
            .with_stock(12)
            .with_created_at(day(3))
            .with_variants(vec![Variant::with_capacity("30L")]),
        Item::new("Executive Laptop Bag", 2000.0)
            .with_sku("LB-99")
            .with_category("Laptop bags")
            .with_brand("Samsonite")
            .with_stock(2)
            .with_created_at(day(1))
            .with_variant_options(vec![Variant::with_capacity("20L")]),
        Item::new("Slim Laptop Sleeve", 35.0)
            .with_sku("LB-10")
            .with_category("Laptop bags")
            .with_brand("Skybags")
            .with_stock(30)
            .with_created_at(day(5)),
        Item::new("Wallet", 15.0)
            .with_sku("WL-02")
            .with_category("Wallets")
            .with_brand("Wildcraft")
            .with_stock(40)
            .with_status(ItemStatus::Draft)
            .with_created_at(day(2)),
        Item::new("Trekking Backpack", 120.0)
            .with_sku("TB-50")
            .with_category("Backpacks")
            .with_brand("Wildcraft")
            .with_stock(7)
            .with_created_at(day(4))
            .with_variants(vec![Variant::with_capacity("50L"), Variant::with_capacity("65L")]),
    ]
}

/// `count` items named "Item 00".. in School bags / Laptop bags (every 5th)
pub fn numbered(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let category = if i % 5 == 0 { "Laptop bags" } else { "School bags" };
            Item::new(format!("Item {i:02}"), (i * 10) as f64).with_category(category)
        })
        .collect()
}

pub fn names<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
    items.into_iter().map(|item| item.name.as_str()).collect()
}

pub fn storefront() -> Pipeline<Item> {
    catalog::storefront::pipeline(&ViewConfig::storefront()).unwrap()
}

pub fn admin() -> Pipeline<Item> {
    catalog::admin::pipeline(&ViewConfig::admin()).unwrap()
}
