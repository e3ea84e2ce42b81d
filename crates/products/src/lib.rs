//! Products domain module.
//!
//! This crate describes the catalog's persisted record (`Product`), its closed
//! category set and its exact-decimal price, plus the translation to and from
//! a plain JSON key/value representation. It performs no IO; persistence
//! lives in `catalog-infra`.

pub mod category;
pub mod price;
pub mod product;

pub use category::Category;
pub use price::Price;
pub use product::{Product, ProductId};
