#![allow(dead_code)]

use catalog_infra::{Database, StoreConfig, init_db};
use catalog_products::{Category, Price, Product};
use proptest::prelude::*;

/// Fresh in-memory store with the schema in place.
pub fn test_db() -> Database {
    catalog_observability::init_for_tests();
    init_db(&StoreConfig::in_memory()).expect("in-memory store should open")
}

pub fn arb_category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

/// Unpersisted product with realistic field values.
pub fn arb_product() -> impl Strategy<Value = Product> {
    (
        "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,10})?",
        "[A-Za-z0-9 ,.'-]{0,80}",
        0i64..10_000_000,
        any::<bool>(),
        arb_category(),
    )
        .prop_map(|(name, description, cents, available, category)| {
            Product::new(
                name,
                description,
                Price::from_cents(cents).expect("cents range fits the price column"),
                available,
                category,
            )
        })
}

pub fn arb_products(len: usize) -> impl Strategy<Value = Vec<Product>> {
    proptest::collection::vec(arb_product(), len)
}

/// Create every product and return them with their assigned ids.
pub fn persist_all(db: &Database, products: Vec<Product>) -> Vec<Product> {
    use catalog_infra::ProductRecord;

    products
        .into_iter()
        .map(|mut product| {
            product.create(db).expect("create should succeed");
            product
        })
        .collect()
}
