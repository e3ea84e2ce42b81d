//! `catalog-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::ValidationError;
pub use id::RecordId;
pub use value_object::ValueObject;
