//! Infrastructure layer: store handle, product persistence, queries.
//!
//! ```no_run
//! use catalog_infra::{ProductRecord, StoreConfig, init_db};
//! use catalog_products::{Category, Price, Product};
//!
//! let db = init_db(&StoreConfig::from_env()?)?;
//!
//! let mut hat = Product::new("Fedora", "A red hat", "12.50".parse::<Price>()?, true, Category::Cloths);
//! hat.create(&db)?;
//!
//! let cloths = Product::find_by_category(&db, Category::Cloths);
//! assert_eq!(cloths.count()?, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod record;
mod row;

pub use config::{ConfigError, StoreConfig};
pub use db::{Database, init_db};
pub use error::{RecordError, RecordResult};
pub use query::{PriceFilter, ProductFilter, ProductQuery};
pub use record::ProductRecord;
